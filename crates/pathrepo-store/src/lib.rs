//! pathrepo-store: an in-memory, path-addressed resource repository.
//!
//! Resources are stored by canonical absolute path in one ordered mapping.
//! Directories are not containers at runtime: a directory's children are the
//! stored paths one segment below it. Missing ancestors are materialized as
//! virtual directories on insertion.
//!
//! # Quick Start
//!
//! ```
//! use pathrepo_store::{DirectoryResource, FileResource, Repository};
//!
//! let mut repo = Repository::new();
//! repo.add(
//!     "/app/views",
//!     DirectoryResource::new("views")
//!         .with_entry(FileResource::new("index.twig", "{% block body %}{% endblock %}"))
//!         .with_entry(FileResource::new("layout.twig", "<html></html>")),
//! )
//! .unwrap();
//!
//! let twigs: Vec<&str> = repo
//!     .find("/app/**/*.twig")
//!     .unwrap()
//!     .iter()
//!     .map(|r| r.name())
//!     .collect();
//! assert_eq!(twigs, vec!["index.twig", "layout.twig"]);
//! ```
//!
//! # Modules
//!
//! - `store`: the ordered path mapping and its undo journal
//! - `matcher`: selector resolution over the mapping
//! - `tree`: virtual directory materialization
//! - `attachment`: single-owner bookkeeping for stored resources
//! - [`backend`]: resolution of reference strings passed to `add`
//! - [`config`]: repository settings loaded from TOML

mod attachment;
pub mod backend;
pub mod config;
mod matcher;
mod repository;
mod store;
mod tree;

pub use backend::ResourceBackend;
pub use config::RepositoryConfig;
pub use repository::Repository;

// Re-export the building blocks callers need alongside the repository
pub use pathrepo_glob::{GlobOptions, Selector};
pub use pathrepo_types::{
    AddValue, Directory, DirectoryResource, FileResource, RepoError, RepoResult, RepositoryId,
    Resource, ResourceState,
};
