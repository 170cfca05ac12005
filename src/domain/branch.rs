use std::fmt;

/// The branch HEAD points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_detached: bool,
}

impl BranchContext {
    /// Create a context for a named branch
    pub fn new(name: impl Into<String>) -> Self {
        BranchContext {
            name: name.into(),
            is_detached: false,
        }
    }

    /// Context for a HEAD that is not on any branch
    pub fn detached() -> Self {
        BranchContext {
            name: "HEAD".to_string(),
            is_detached: true,
        }
    }

    /// Pick the active branch from `git branch` output (`* main`)
    pub fn from_listing(listing: &str) -> Option<Self> {
        listing
            .lines()
            .map(|line| line.trim().trim_matches('"'))
            .find_map(|line| line.strip_prefix("* "))
            .map(|name| {
                if name.starts_with("(HEAD detached") {
                    BranchContext::detached()
                } else {
                    BranchContext::new(name.trim())
                }
            })
    }
}

impl fmt::Display for BranchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_detached {
            write!(f, "(detached HEAD)")
        } else {
            write!(f, "{}", self.name)
        }
    }
}
