//! Lazy materialization of ancestor directories.

use pathrepo_glob::{ROOT, directory_of, file_name};
use pathrepo_types::{DirectoryResource, RepoError, RepoResult, Resource};

use crate::attachment;
use crate::store::{Journal, PathStore};

impl PathStore {
    /// Make sure a directory exists at `path`, creating virtual directories
    /// for every missing ancestor.
    ///
    /// Fails with `NoDirectory` if `path` or one of its ancestors holds a
    /// leaf. The missing chain is collected bottom-up and inserted top-down,
    /// so depth is bounded by memory rather than the stack.
    pub(crate) fn ensure_directory_exists(
        &mut self,
        path: &str,
        journal: &mut Journal,
    ) -> RepoResult<()> {
        let mut missing = Vec::new();
        let mut current = path;
        loop {
            match self.get(current) {
                Some(resource) if resource.is_directory() => break,
                Some(_) => return Err(RepoError::NoDirectory(current.to_string())),
                None if current == ROOT => return Err(RepoError::NotFound(ROOT.to_string())),
                None => {
                    missing.push(current);
                    current = directory_of(current);
                }
            }
        }

        for dir in missing.into_iter().rev() {
            let mut virtual_dir: Box<dyn Resource> =
                Box::new(DirectoryResource::virtual_dir(file_name(dir)));
            attachment::finalize(virtual_dir.as_mut(), self.id(), dir);
            tracing::debug!(path = dir, "materialized virtual directory");
            self.put(dir, virtual_dir, journal);
        }
        Ok(())
    }
}
