use std::path::{Path, PathBuf};

use thiserror::Error;

/// Unified error type for repo-version operations
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version {candidate} is not greater than current version {current}")]
    Monotonicity { candidate: String, current: String },

    #[error("Commit {commit} is already versioned as {version}")]
    AlreadyVersioned { commit: String, version: String },

    #[error("Cannot access repository '{}': {reason}", path.display())]
    Repository { path: PathBuf, reason: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in repo-version
pub type Result<T> = std::result::Result<T, VersionError>;

impl VersionError {
    /// Create a parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        VersionError::Parse(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionError::Config(msg.into())
    }

    /// Create a repository access error for `path`
    pub fn repository(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        VersionError::Repository {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
