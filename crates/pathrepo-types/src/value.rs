//! Values accepted by `Repository::add`.

use crate::directory::DirectoryResource;
use crate::file::FileResource;
use crate::resource::Resource;

/// What to insert at a path.
#[derive(Debug)]
pub enum AddValue {
    /// A path or selector resolved through the repository's backend.
    Reference(String),
    /// One resource, stored at the target path.
    Resource(Box<dyn Resource>),
    /// Resources stored as children of the target path.
    ///
    /// Only `Resource` members are supported; references and nested
    /// collections are rejected.
    Collection(Vec<AddValue>),
}

impl AddValue {
    /// Short description used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AddValue::Reference(_) => "reference",
            AddValue::Resource(_) => "resource",
            AddValue::Collection(_) => "collection",
        }
    }
}

impl From<&str> for AddValue {
    fn from(reference: &str) -> Self {
        AddValue::Reference(reference.to_string())
    }
}

impl From<String> for AddValue {
    fn from(reference: String) -> Self {
        AddValue::Reference(reference)
    }
}

impl From<Box<dyn Resource>> for AddValue {
    fn from(resource: Box<dyn Resource>) -> Self {
        AddValue::Resource(resource)
    }
}

impl From<FileResource> for AddValue {
    fn from(resource: FileResource) -> Self {
        AddValue::Resource(Box::new(resource))
    }
}

impl From<DirectoryResource> for AddValue {
    fn from(resource: DirectoryResource) -> Self {
        AddValue::Resource(Box::new(resource))
    }
}

impl From<Vec<Box<dyn Resource>>> for AddValue {
    fn from(resources: Vec<Box<dyn Resource>>) -> Self {
        resources.into_iter().collect()
    }
}

impl FromIterator<Box<dyn Resource>> for AddValue {
    fn from_iter<I: IntoIterator<Item = Box<dyn Resource>>>(iter: I) -> Self {
        AddValue::Collection(iter.into_iter().map(AddValue::Resource).collect())
    }
}
