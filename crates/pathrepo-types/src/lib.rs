//! Pure data types for pathrepo: resources, attachments, errors.
//!
//! This crate is a leaf dependency with no I/O and no matching logic. It
//! exists so that resource implementations can be written against the
//! repository contracts without pulling in the store itself.

pub mod directory;
pub mod error;
pub mod file;
pub mod resource;
pub mod value;

// Flat re-exports for convenience
pub use directory::*;
pub use error::*;
pub use file::*;
pub use resource::*;
pub use value::*;
