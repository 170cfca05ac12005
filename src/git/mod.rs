//! Git operations abstraction layer
//!
//! Everything repo-version needs from version control goes through the
//! [Repository] trait: raw tag history, the HEAD commit, the active branch and
//! writing one annotated tag. Each handle is bound to a single repository
//! path, so no operation depends on the process working directory.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! ```rust
//! # use repo_version::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> repo_version::Result<()> {
//! for entry in repo.tag_history()? {
//!     println!("{} {}", entry.commit, entry.refs);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::domain::{BranchContext, HeadCommit, TagEntry};
use crate::error::Result;

/// Version-control operations used by repo-version
///
/// Implementations map their underlying failures to
/// [crate::error::VersionError] variants.
pub trait Repository {
    /// Root directory of the working tree
    fn path(&self) -> &Path;

    /// Raw tag history, one entry per tag
    ///
    /// Entries are not validated; tags that are not versions are filtered out
    /// later by the parser.
    ///
    /// # Returns
    /// * `Ok(Vec<TagEntry>)` - Commit, timestamp and ref text per tag, any order
    /// * `Err` - If the history cannot be read
    fn tag_history(&self) -> Result<Vec<TagEntry>>;

    /// The commit HEAD points at, with its ref decoration
    fn head_commit(&self) -> Result<HeadCommit>;

    /// The branch HEAD is on
    fn active_branch(&self) -> Result<BranchContext>;

    /// Create an annotated tag on `commit`
    ///
    /// # Arguments
    /// * `name` - Tag name, e.g. `v1.2.3`
    /// * `commit` - Full or abbreviated commit id
    /// * `message` - Annotation message
    ///
    /// # Returns
    /// * `Ok(())` - Tag created
    /// * `Err` - If the tag already exists or the commit cannot be found
    fn create_annotated_tag(&self, name: &str, commit: &str, message: &str) -> Result<()>;
}
