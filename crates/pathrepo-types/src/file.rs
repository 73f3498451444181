//! Leaf resources.

use crate::resource::{Resource, ResourceState};

/// A leaf resource holding a byte body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    state: ResourceState,
    body: Vec<u8>,
}

impl FileResource {
    /// Create a file resource.
    pub fn new(name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            state: ResourceState::new(name),
            body: body.into(),
        }
    }

    /// Create an empty file resource.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl Resource for FileResource {
    fn state(&self) -> &ResourceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ResourceState {
        &mut self.state
    }

    fn clone_resource(&self) -> Box<dyn Resource> {
        Box::new(self.clone())
    }

    fn content(&self) -> Option<&[u8]> {
        Some(&self.body)
    }
}
