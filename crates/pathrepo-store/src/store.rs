//! The path-indexed mapping.
//!
//! Keys are canonical absolute paths kept in lexicographic order by the
//! `BTreeMap`. The root `/` is inserted at construction and never leaves.

use std::collections::BTreeMap;
use std::ops::Bound;

use pathrepo_glob::{ROOT, is_valid_name, join};
use pathrepo_types::{DirectoryResource, RepoError, RepoResult, RepositoryId, Resource};

use crate::attachment;

/// Mapping changes made by one `add` call, oldest first.
///
/// Each record holds the path and whatever was stored there before.
#[derive(Debug, Default)]
pub(crate) struct Journal {
    undo: Vec<(String, Option<Box<dyn Resource>>)>,
}

impl Journal {
    fn record(&mut self, path: String, previous: Option<Box<dyn Resource>>) {
        self.undo.push((path, previous));
    }

    pub(crate) fn len(&self) -> usize {
        self.undo.len()
    }
}

/// Ordered mapping from canonical path to resource.
#[derive(Debug)]
pub(crate) struct PathStore {
    id: RepositoryId,
    entries: BTreeMap<String, Box<dyn Resource>>,
}

impl PathStore {
    pub(crate) fn new(id: RepositoryId) -> Self {
        let mut root: Box<dyn Resource> = Box::new(DirectoryResource::virtual_dir(""));
        attachment::finalize(root.as_mut(), id, ROOT);

        let mut entries = BTreeMap::new();
        entries.insert(ROOT.to_string(), root);
        Self { id, entries }
    }

    pub(crate) fn id(&self) -> RepositoryId {
        self.id
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn get(&self, path: &str) -> Option<&dyn Resource> {
        self.entries.get(path).map(|resource| resource.as_ref())
    }

    pub(crate) fn get_entry(&self, path: &str) -> Option<(&str, &dyn Resource)> {
        self.entries
            .get_key_value(path)
            .map(|(path, resource)| (path.as_str(), resource.as_ref()))
    }

    pub(crate) fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries from `start` onward, in path order.
    pub(crate) fn range_from<'s>(
        &'s self,
        start: &str,
    ) -> impl Iterator<Item = (&'s str, &'s dyn Resource)> + use<'s> {
        self.entries
            .range::<str, _>((Bound::Included(start), Bound::Unbounded))
            .map(|(path, resource)| (path.as_str(), resource.as_ref()))
    }

    /// Store `resource` at `path`, recording what it replaces.
    pub(crate) fn put(
        &mut self,
        path: &str,
        resource: Box<dyn Resource>,
        journal: &mut Journal,
    ) {
        let previous = self.entries.insert(path.to_string(), resource);
        journal.record(path.to_string(), previous);
    }

    /// Insert one resource whose parent directory already exists.
    ///
    /// An existing resource at `path` is overridden: its state is folded into
    /// the incoming one before the entry is replaced. A directory's own
    /// entries are inserted below it, and each resource is attached only
    /// after everything below it is in place. The root is never replaced; a
    /// directory added at `/` only contributes its entries.
    ///
    /// Walks the incoming tree with an explicit stack.
    pub(crate) fn insert(
        &mut self,
        path: &str,
        resource: Box<dyn Resource>,
        journal: &mut Journal,
    ) -> RepoResult<()> {
        let mut pending = vec![(path.to_string(), resource)];
        let mut placed = Vec::new();

        while let Some((path, resource)) = pending.pop() {
            let mut resource = attachment::adopt(resource);

            if let Some(previous) = self.get(&path) {
                let loses_children =
                    path == ROOT || (previous.is_directory() && self.has_children(&path));
                if !resource.is_directory() && loses_children {
                    return Err(RepoError::NoDirectory(path));
                }
                if path != ROOT {
                    resource.override_previous(previous);
                }
            }

            // Read entries while the resource still carries its old attachment
            let children = resource
                .as_directory_mut()
                .map(|dir| dir.take_entries())
                .unwrap_or_default();
            for child in children.into_iter().rev() {
                let child_path = entry_path(&path, child.name())?;
                pending.push((child_path, child));
            }

            if path != ROOT {
                self.put(&path, resource, journal);
                placed.push(path);
            }
        }

        // Parents were placed before their children
        for path in placed.iter().rev() {
            if let Some(stored) = self.entries.get_mut(path) {
                attachment::finalize(stored.as_mut(), self.id, path);
            }
        }
        Ok(())
    }

    /// Remove `path` and everything below it, children first.
    ///
    /// Returns the number of resources removed; 0 if `path` is already gone.
    pub(crate) fn remove_tree(&mut self, path: &str) -> usize {
        debug_assert_ne!(path, ROOT, "root is never removed");

        if !self.entries.contains_key(path) {
            return 0;
        }

        let below: Vec<String> = self
            .descendants(path)
            .into_iter()
            .map(|(descendant, _)| descendant.to_string())
            .collect();

        // Descending path order puts every child before its parent
        let mut removed = 0;
        for doomed in below.iter().rev().map(String::as_str).chain([path]) {
            if let Some(mut resource) = self.entries.remove(doomed) {
                attachment::release(resource.as_mut(), self.id);
                removed += 1;
            }
        }
        removed
    }

    /// Keep the changes of a successful `add`, releasing replaced resources.
    pub(crate) fn commit(&mut self, journal: Journal) {
        for (_, previous) in journal.undo {
            if let Some(mut previous) = previous {
                attachment::release(previous.as_mut(), self.id);
            }
        }
    }

    /// Undo the changes of a failed `add`, newest first.
    pub(crate) fn rollback(&mut self, journal: Journal) {
        for (path, previous) in journal.undo.into_iter().rev() {
            let discarded = match previous {
                Some(previous) => self.entries.insert(path, previous),
                None => self.entries.remove(&path),
            };
            if let Some(mut discarded) = discarded {
                attachment::release(discarded.as_mut(), self.id);
            }
        }
    }
}

/// Path of the entry `name` inside directory `dir`.
pub(crate) fn entry_path(dir: &str, name: &str) -> RepoResult<String> {
    if is_valid_name(name) {
        Ok(join(dir, name))
    } else {
        Err(RepoError::InvalidArgument(format!(
            "invalid entry name {name:?} under {dir}"
        )))
    }
}
