//! Absolute path helpers.
//!
//! Every path the repository stores is canonical: it starts with `/`, has no
//! empty, `.` or `..` segments and no trailing separator. The root is `/`.

use thiserror::Error;

/// The root path.
pub const ROOT: &str = "/";

/// Errors from path and selector validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path must not be empty")]
    Empty,
    #[error("path must be absolute: {0}")]
    NotAbsolute(String),
    #[error("selector expands to more than {limit} alternatives: {pattern}")]
    TooManyAlternatives { pattern: String, limit: usize },
}

/// Canonicalize an absolute path.
///
/// Repeated separators collapse, `.` segments vanish and `..` pops the
/// previous segment (never above the root).
///
/// ```
/// use pathrepo_glob::canonicalize;
///
/// assert_eq!(canonicalize("/app//views/./../css/").unwrap(), "/app/css");
/// assert_eq!(canonicalize("/..").unwrap(), "/");
/// assert!(canonicalize("app").is_err());
/// ```
pub fn canonicalize(path: &str) -> Result<String, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if !path.starts_with('/') {
        return Err(PathError::NotAbsolute(path.to_string()));
    }

    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }

    let mut out = String::with_capacity(path.len());
    for part in &parts {
        out.push('/');
        out.push_str(part);
    }
    if out.is_empty() {
        out.push('/');
    }
    Ok(out)
}

/// Parent directory of a canonical path. The root is its own parent.
pub fn directory_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => ROOT,
        Some(idx) => &path[..idx],
    }
}

/// Last segment of a canonical path; empty for the root.
pub fn file_name(path: &str) -> &str {
    path.rfind('/').map_or(path, |idx| &path[idx + 1..])
}

/// Append one segment to a canonical directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// True if `name` can be used as a single path segment.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}
