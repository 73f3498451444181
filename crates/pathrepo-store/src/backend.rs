//! Backends resolve the string form of `Repository::add`.
//!
//! `add("/target", "/source/*")` asks the backend for copies of whatever the
//! reference names. Any repository can serve as the backend of another.

use pathrepo_types::{RepoResult, Resource};

/// Read-only source of resources for reference strings.
pub trait ResourceBackend: Send + Sync {
    /// Copy of the resource at an exact path, or `NotFound`.
    fn get(&self, path: &str) -> RepoResult<Box<dyn Resource>>;

    /// Copies of every resource matching a selector, in path order.
    fn find(&self, selector: &str) -> RepoResult<Vec<Box<dyn Resource>>>;
}
