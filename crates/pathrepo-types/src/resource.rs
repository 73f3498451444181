//! The resource contract and its attachment bookkeeping.
//!
//! A resource is owned by at most one repository at a time. The owning
//! repository and the path the resource is stored at travel with the value
//! itself in [`ResourceState`], so a copy handed to another repository can
//! tell it came from somewhere else.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REPOSITORY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one repository instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryId(u64);

impl RepositoryId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        Self(NEXT_REPOSITORY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "repo#{}", self.0)
    }
}

/// State every resource carries: name, attachment and revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceState {
    name: String,
    path: Option<String>,
    repository: Option<RepositoryId>,
    revision: u64,
}

impl ResourceState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            repository: None,
            revision: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path the resource was last stored at. Kept after detaching.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn repository(&self) -> Option<RepositoryId> {
        self.repository
    }

    /// Number of resources this one has replaced at its path.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn attach_to(&mut self, repository: RepositoryId, path: &str) {
        self.repository = Some(repository);
        self.path = Some(path.to_string());
    }

    /// Clear the ownership link if `repository` is the current owner.
    pub fn detach(&mut self, repository: RepositoryId) {
        if self.repository == Some(repository) {
            self.repository = None;
        }
    }

    /// Fold the replaced resource's history into this one.
    pub fn fold(&mut self, previous: &dyn Resource) {
        self.revision = previous.revision() + 1;
    }
}

/// A named entity stored at a path.
///
/// Implementors only provide state access, cloning and, for directories,
/// [`Resource::as_directory`]. Everything else has a default built on
/// [`ResourceState`].
pub trait Resource: fmt::Debug + Send + Sync {
    fn state(&self) -> &ResourceState;

    fn state_mut(&mut self) -> &mut ResourceState;

    /// Deep value copy, attachment tag included.
    fn clone_resource(&self) -> Box<dyn Resource>;

    fn name(&self) -> &str {
        self.state().name()
    }

    fn path(&self) -> Option<&str> {
        self.state().path()
    }

    fn repository(&self) -> Option<RepositoryId> {
        self.state().repository()
    }

    fn is_attached(&self) -> bool {
        self.state().repository().is_some()
    }

    fn revision(&self) -> u64 {
        self.state().revision()
    }

    fn attach_to(&mut self, repository: RepositoryId, path: &str) {
        self.state_mut().attach_to(repository, path);
    }

    fn detach(&mut self, repository: RepositoryId) {
        self.state_mut().detach(repository);
    }

    /// Merge the state of the resource this one replaces.
    ///
    /// Called before the previous resource leaves the mapping.
    fn override_previous(&mut self, previous: &dyn Resource) {
        self.state_mut().fold(previous);
    }

    /// File contents, for leaf resources that have any.
    fn content(&self) -> Option<&[u8]> {
        None
    }

    fn as_directory(&self) -> Option<&dyn Directory> {
        None
    }

    fn as_directory_mut(&mut self) -> Option<&mut dyn Directory> {
        None
    }

    fn is_directory(&self) -> bool {
        self.as_directory().is_some()
    }
}

/// Child entries a directory resource carries before it is stored.
///
/// Once a directory is inserted its entries move into the repository, which
/// is then the only place children are listed from.
pub trait Directory {
    /// Own entries, ordered by name.
    fn list_entries(&self) -> Vec<&dyn Resource>;

    /// Add or replace the entry with the same name.
    fn insert_entry(&mut self, entry: Box<dyn Resource>);

    /// Move all entries out, ordered by name.
    fn take_entries(&mut self) -> Vec<Box<dyn Resource>>;

    /// True for directories synthesized only to make a path addressable.
    fn is_virtual(&self) -> bool {
        false
    }
}
