//! Directory resources.

use std::collections::BTreeMap;

use crate::resource::{Directory, Resource, ResourceState};

/// A directory resource with its own named entries.
#[derive(Debug)]
pub struct DirectoryResource {
    state: ResourceState,
    entries: BTreeMap<String, Box<dyn Resource>>,
    is_virtual: bool,
}

impl DirectoryResource {
    /// Create an empty directory resource.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: ResourceState::new(name),
            entries: BTreeMap::new(),
            is_virtual: false,
        }
    }

    /// Create a directory that only exists to make a path addressable.
    pub fn virtual_dir(name: impl Into<String>) -> Self {
        Self {
            is_virtual: true,
            ..Self::new(name)
        }
    }

    /// Builder form of [`Directory::insert_entry`].
    pub fn with_entry(mut self, entry: impl Resource + 'static) -> Self {
        self.insert_entry(Box::new(entry));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Clone for DirectoryResource {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            entries: self
                .entries
                .iter()
                .map(|(name, entry)| (name.clone(), entry.clone_resource()))
                .collect(),
            is_virtual: self.is_virtual,
        }
    }
}

impl Resource for DirectoryResource {
    fn state(&self) -> &ResourceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ResourceState {
        &mut self.state
    }

    fn clone_resource(&self) -> Box<dyn Resource> {
        Box::new(self.clone())
    }

    fn as_directory(&self) -> Option<&dyn Directory> {
        Some(self)
    }

    fn as_directory_mut(&mut self) -> Option<&mut dyn Directory> {
        Some(self)
    }
}

impl Directory for DirectoryResource {
    fn list_entries(&self) -> Vec<&dyn Resource> {
        self.entries.values().map(|entry| entry.as_ref()).collect()
    }

    fn insert_entry(&mut self, entry: Box<dyn Resource>) {
        self.entries.insert(entry.name().to_string(), entry);
    }

    fn take_entries(&mut self) -> Vec<Box<dyn Resource>> {
        std::mem::take(&mut self.entries).into_values().collect()
    }

    fn is_virtual(&self) -> bool {
        self.is_virtual
    }
}
