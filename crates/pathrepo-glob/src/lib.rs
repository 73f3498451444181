//! pathrepo-glob: path canonicalization and selector compilation.
//!
//! Provides:
//! - **canonicalize** and friends: absolute path normalization helpers
//! - **glob_match**: segment-level glob matching with brace expansion
//! - **Selector**: an absolute path pattern split into a static prefix and an
//!   anchored full-path predicate, with `**` (globstar) support
//!
//! The repository engine only talks to this crate through these helpers, so
//! the selector syntax can evolve without touching the store.

pub mod glob;
pub mod path;
mod selector;

pub use glob::{
    DEFAULT_MATCH_WORK_LIMIT, DEFAULT_MAX_ALTERNATIVES, GlobOptions, expand_braces, glob_match,
    glob_match_with,
};
pub use path::{
    PathError, ROOT, canonicalize, directory_of, file_name, is_valid_name, join, segments,
};
pub use selector::{PathSegment, Selector};
