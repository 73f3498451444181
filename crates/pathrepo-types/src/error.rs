//! Repository error type.

use thiserror::Error;

/// Result type for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

/// Repository operation errors.
///
/// Every variant carries the offending path or selector, except
/// `RootRemoval` whose subject is always `/`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not a directory: {0}")]
    NoDirectory(String),
    #[error("unsupported resource: {0}")]
    UnsupportedResource(String),
    #[error("the root directory cannot be removed")]
    RootRemoval,
    #[error("no backend configured to resolve {0}")]
    NoBackend(String),
}

impl RepoError {
    /// Path or selector the error refers to.
    pub fn subject(&self) -> &str {
        match self {
            RepoError::InvalidArgument(s)
            | RepoError::NotFound(s)
            | RepoError::NoDirectory(s)
            | RepoError::UnsupportedResource(s)
            | RepoError::NoBackend(s) => s,
            RepoError::RootRemoval => "/",
        }
    }
}
