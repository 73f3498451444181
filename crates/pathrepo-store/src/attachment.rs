//! Exclusive ownership of resources.
//!
//! A resource is attached to at most one repository. Resources arriving with
//! an attachment are copied before they are stored, the copy is attached once
//! it has reached its final path, and removal detaches it again.

use pathrepo_types::{RepositoryId, Resource};

/// Take ownership of an incoming resource.
///
/// Returns a value copy when the resource is still attached somewhere, so
/// its previous owner never observes the insertion.
pub(crate) fn adopt(resource: Box<dyn Resource>) -> Box<dyn Resource> {
    match resource.repository() {
        Some(owner) => {
            tracing::debug!(
                %owner,
                name = resource.name(),
                "copying resource attached to another repository"
            );
            resource.clone_resource()
        }
        None => resource,
    }
}

/// Attach a stored resource at its final path.
pub(crate) fn finalize(resource: &mut dyn Resource, repository: RepositoryId, path: &str) {
    resource.attach_to(repository, path);
}

/// Detach a resource leaving the mapping.
pub(crate) fn release(resource: &mut dyn Resource, repository: RepositoryId) {
    resource.detach(repository);
}
