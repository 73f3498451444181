//! The public repository surface.
//!
//! Every operation validates and canonicalizes its path or selector before it
//! touches the store, so malformed arguments fail with `InvalidArgument`
//! without side effects.

use std::collections::BTreeMap;
use std::sync::Arc;

use pathrepo_glob::{GlobOptions, PathError, ROOT, Selector, canonicalize, directory_of};
use pathrepo_types::{AddValue, RepoError, RepoResult, RepositoryId, Resource};

use crate::backend::ResourceBackend;
use crate::config::RepositoryConfig;
use crate::store::{Journal, PathStore, entry_path};

/// An `add` value after backend references are resolved.
enum Resolved {
    Single(Box<dyn Resource>),
    Many(Vec<Box<dyn Resource>>),
}

/// In-memory, path-addressed resource repository.
///
/// The root directory `/` always exists. Adding a resource anywhere creates
/// the missing ancestors as virtual directories.
///
/// # Examples
/// ```
/// use pathrepo_store::{FileResource, Repository};
///
/// let mut repo = Repository::new();
/// repo.add("/app/views/index.twig", FileResource::new("index.twig", "{{ body }}")).unwrap();
///
/// assert!(repo.contains("/app/views/*.twig").unwrap());
/// assert_eq!(repo.list_directory("/app").unwrap()[0].name(), "views");
/// assert_eq!(repo.remove("/app").unwrap(), 3);
/// ```
pub struct Repository {
    store: PathStore,
    options: GlobOptions,
    backend: Option<Arc<dyn ResourceBackend>>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("id", &self.store.id())
            .field("len", &self.store.len())
            .field("options", &self.options)
            .field("backend", &self.backend.is_some())
            .finish()
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    /// Create a repository holding only the root directory.
    pub fn new() -> Self {
        Self::with_config(&RepositoryConfig::default())
    }

    /// Create a repository with explicit selector settings.
    pub fn with_config(config: &RepositoryConfig) -> Self {
        Self {
            store: PathStore::new(RepositoryId::next()),
            options: config.glob_options(),
            backend: None,
        }
    }

    /// Resolve string arguments of [`Repository::add`] through `backend`.
    pub fn with_backend(mut self, backend: Arc<dyn ResourceBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn id(&self) -> RepositoryId {
        self.store.id()
    }

    pub fn options(&self) -> &GlobOptions {
        &self.options
    }

    /// Number of stored resources, the root included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Always false: the root is never removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All stored paths in ascending order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.store.paths()
    }

    /// The resource at an exact path.
    pub fn get(&self, path: &str) -> RepoResult<&dyn Resource> {
        let path = self.canonical(path)?;
        self.store.get(&path).ok_or(RepoError::NotFound(path))
    }

    /// Every resource matching `selector`, in ascending path order.
    pub fn find(&self, selector: &str) -> RepoResult<Vec<&dyn Resource>> {
        let selector = self.selector(selector)?;
        Ok(self
            .store
            .find(&selector)
            .into_iter()
            .map(|(_, resource)| resource)
            .collect())
    }

    /// True if at least one stored path matches `selector`.
    pub fn contains(&self, selector: &str) -> RepoResult<bool> {
        let selector = self.selector(selector)?;
        Ok(self.store.matches_any(&selector))
    }

    /// Insert a resource, a collection, or a backend reference at `path`.
    ///
    /// - a single resource is stored at `path`;
    /// - each member of a collection is stored at `path/<name>`;
    /// - a reference string is looked up in the backend: exactly when it has
    ///   no wildcard (stored like a single resource), by selector otherwise
    ///   (stored like a collection).
    ///
    /// The call is atomic: on error the store is left as it was.
    #[tracing::instrument(level = "debug", skip(self, value), fields(repository = %self.store.id()), err)]
    pub fn add(&mut self, path: &str, value: impl Into<AddValue>) -> RepoResult<()> {
        let path = self.canonical(path)?;
        let resolved = self.resolve(&path, value.into())?;

        let mut journal = Journal::default();
        match self.insert_resolved(&path, resolved, &mut journal) {
            Ok(()) => {
                self.store.commit(journal);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%path, error = %err, changes = journal.len(), "rolling back add");
                self.store.rollback(journal);
                Err(err)
            }
        }
    }

    /// Remove every resource matching `selector`, descendants first.
    ///
    /// Matches are computed before anything is removed. Returns the number of
    /// resources removed, descendants included.
    #[tracing::instrument(level = "debug", skip(self), fields(repository = %self.store.id()), err)]
    pub fn remove(&mut self, selector: &str) -> RepoResult<usize> {
        let selector = self.selector(selector)?;
        if selector.is_root() {
            return Err(RepoError::RootRemoval);
        }

        let matched = self.store.matching_paths(&selector);
        let removed: usize = matched
            .iter()
            .filter(|path| path.as_str() != ROOT)
            .map(|path| self.store.remove_tree(path))
            .sum();
        tracing::debug!(matched = matched.len(), removed, "removed resources");
        Ok(removed)
    }

    /// Immediate children of the directory at `path`, in ascending order.
    pub fn list_directory(&self, path: &str) -> RepoResult<Vec<&dyn Resource>> {
        let path = self.canonical(path)?;
        match self.store.get(&path) {
            None => Err(RepoError::NotFound(path)),
            Some(resource) if !resource.is_directory() => Err(RepoError::NoDirectory(path)),
            Some(_) => Ok(self
                .store
                .children(&path)
                .into_iter()
                .map(|(_, resource)| resource)
                .collect()),
        }
    }

    /// Deep copy of the resource at `path` with its stored subtree.
    ///
    /// Directory copies carry every stored descendant as entries, so adding
    /// the snapshot to another repository reproduces the subtree there. The
    /// copy keeps its attachment tag.
    pub fn snapshot(&self, path: &str) -> RepoResult<Box<dyn Resource>> {
        let path = self.canonical(path)?;
        self.copy_tree(&path)
            .ok_or_else(|| RepoError::NotFound(path.clone()))
    }

    fn copy_tree(&self, path: &str) -> Option<Box<dyn Resource>> {
        let mut copy = self.store.get(path)?.clone_resource();
        let mut copies: BTreeMap<&str, Box<dyn Resource>> = self
            .store
            .descendants(path)
            .into_iter()
            .map(|(descendant, resource)| (descendant, resource.clone_resource()))
            .collect();

        // Descending path order hands every child to its parent complete
        while let Some((child_path, child)) = copies.pop_last() {
            let parent = directory_of(child_path);
            let dir = if parent == path {
                copy.as_directory_mut()
            } else {
                copies.get_mut(parent).and_then(|p| p.as_directory_mut())
            };
            if let Some(dir) = dir {
                dir.insert_entry(child);
            }
        }
        Some(copy)
    }

    fn canonical(&self, path: &str) -> RepoResult<String> {
        canonicalize(path).map_err(invalid_argument)
    }

    fn selector(&self, selector: &str) -> RepoResult<Selector> {
        Selector::new(selector, self.options).map_err(invalid_argument)
    }

    fn resolve(&self, path: &str, value: AddValue) -> RepoResult<Resolved> {
        match value {
            AddValue::Resource(resource) => Ok(Resolved::Single(resource)),
            AddValue::Collection(members) => members
                .into_iter()
                .map(|member| match member {
                    AddValue::Resource(resource) => Ok(resource),
                    other => Err(RepoError::UnsupportedResource(format!(
                        "{path}: a {} cannot be a collection member",
                        other.kind()
                    ))),
                })
                .collect::<RepoResult<Vec<_>>>()
                .map(Resolved::Many),
            AddValue::Reference(reference) => {
                let Some(backend) = &self.backend else {
                    return Err(RepoError::NoBackend(reference));
                };
                let reference = self.canonical(&reference)?;
                // Selector lookups stay collections even with a single match
                if self.options.is_selector(&reference) {
                    backend.find(&reference).map(Resolved::Many)
                } else {
                    backend.get(&reference).map(Resolved::Single)
                }
            }
        }
    }

    fn insert_resolved(
        &mut self,
        path: &str,
        resolved: Resolved,
        journal: &mut Journal,
    ) -> RepoResult<()> {
        match resolved {
            Resolved::Single(resource) => {
                self.store.ensure_directory_exists(directory_of(path), journal)?;
                self.store.insert(path, resource, journal)
            }
            Resolved::Many(resources) => {
                self.store.ensure_directory_exists(path, journal)?;
                for resource in resources {
                    let member_path = entry_path(path, resource.name())?;
                    self.store.insert(&member_path, resource, journal)?;
                }
                Ok(())
            }
        }
    }
}

impl ResourceBackend for Repository {
    fn get(&self, path: &str) -> RepoResult<Box<dyn Resource>> {
        self.snapshot(path)
    }

    fn find(&self, selector: &str) -> RepoResult<Vec<Box<dyn Resource>>> {
        let selector = self.selector(selector)?;
        Ok(self
            .store
            .matching_paths(&selector)
            .iter()
            .filter_map(|path| self.copy_tree(path))
            .collect())
    }
}

fn invalid_argument(err: PathError) -> RepoError {
    RepoError::InvalidArgument(err.to_string())
}
