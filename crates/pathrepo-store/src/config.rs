//! Configuration for pathrepo repositories.
//!
//! Configuration is loaded from `~/.config/pathrepo/repository.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use pathrepo_glob::{DEFAULT_MATCH_WORK_LIMIT, DEFAULT_MAX_ALTERNATIVES, GlobOptions};
use serde::{Deserialize, Serialize};

/// Configuration for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Expand `{a,b}` alternatives in selectors.
    #[serde(default = "default_brace_expansion")]
    pub brace_expansion: bool,

    /// Upper bound on match steps for one selector against one path.
    #[serde(default = "default_match_work_limit")]
    pub match_work_limit: usize,

    /// Selectors whose braces expand to more patterns are rejected.
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,
}

fn default_brace_expansion() -> bool {
    true
}

fn default_match_work_limit() -> usize {
    DEFAULT_MATCH_WORK_LIMIT
}

fn default_max_alternatives() -> usize {
    DEFAULT_MAX_ALTERNATIVES
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            brace_expansion: default_brace_expansion(),
            match_work_limit: default_match_work_limit(),
            max_alternatives: default_max_alternatives(),
        }
    }
}

impl RepositoryConfig {
    /// Load `repository.toml` from the user's config directory.
    pub fn load() -> Result<Self> {
        Self::load_or_default(&Self::config_path()?)
    }

    /// Load `path`, or the defaults when no file exists there.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::debug!(path = %path.display(), "no repository config, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// `<config dir>/pathrepo/repository.toml` for the current user.
    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "pathrepo")
            .map(|dirs| dirs.config_dir().join("repository.toml"))
            .context("Could not determine config directory")
    }

    /// Selector options derived from this configuration.
    pub fn glob_options(&self) -> GlobOptions {
        GlobOptions {
            brace_expansion: self.brace_expansion,
            match_work_limit: self.match_work_limit,
            max_alternatives: self.max_alternatives,
        }
    }
}
