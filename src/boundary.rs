use std::fmt;
use std::path::PathBuf;

/// Non-fatal issues met while working across many repositories.
/// These are reported to the user but never stop the operation.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A repository root was found but its history could not be read
    UnreadableRepository { path: PathBuf, reason: String },
    /// A repository was read but carries no version tag
    NoVersions { path: PathBuf },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnreadableRepository { path, reason } => {
                write!(f, "Skipped repository '{}': {}", path.display(), reason)
            }
            BoundaryWarning::NoVersions { path } => {
                write!(f, "No version tags in '{}'", path.display())
            }
        }
    }
}
