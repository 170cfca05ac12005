//! Main workflow orchestration logic
//!
//! Each function covers one command: showing the versions of a repository,
//! listing the versions of every repository below a directory, and
//! increasing the version of a repository.

use std::path::Path;

use tracing::debug;

use crate::analyzer::collect_versions;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::planner::{IncrementPlan, IncrementPlanner, PlanState};
use crate::scanner::{RepositoryIndex, RepositoryScanner};

/// Result of an increase workflow that ran to a decision
#[derive(Debug, Clone, PartialEq)]
pub struct IncreaseOutcome {
    /// The validated plan that was put to the operator
    pub plan: IncrementPlan,
    /// `Applied` when the tag was written, `Aborted` when declined
    pub state: PlanState,
}

impl IncreaseOutcome {
    pub fn applied(&self) -> bool {
        self.state == PlanState::Applied
    }
}

/// Versions of the repository at `path`
///
/// Unlike a scan, any failure to read the repository is returned.
///
/// # Arguments
/// * `path` - Root of the working tree
/// * `all` - Keep every version instead of only the highest
pub fn show_versions(path: &Path, all: bool) -> Result<RepositoryIndex> {
    let repo = Git2Repository::open(path)?;
    let versions = collect_versions(&repo)?;
    debug!(path = %repo.path().display(), count = versions.len(), "collected versions");

    let index = RepositoryIndex::single(repo.path(), versions);
    Ok(if all { index } else { index.highest_only() })
}

/// Versions of every repository found below `root`
///
/// Repositories that cannot be read are skipped and reported through
/// [RepositoryIndex::warnings].
pub fn list_versions(root: &Path, all: bool, scan: &ScanConfig) -> Result<RepositoryIndex> {
    let index =
        RepositoryScanner::from_config(scan).scan(root, |path| Git2Repository::open(path))?;
    Ok(if all { index } else { index.highest_only() })
}

/// Plan a version increase on `repo`, ask for confirmation and apply it
///
/// # Arguments
/// * `repo` - Repository to tag
/// * `planner` - Planner holding an already validated request
/// * `message_template` - Annotation message, `{tag}` being the tag name
/// * `confirm` - Called with the plan; `Ok(false)` aborts without writing
///
/// # Returns
/// * `Ok(IncreaseOutcome)` - Tag written, or declined by the operator
/// * `Err` - Planning failed or the tag could not be written
pub fn increase_version<R, F>(
    repo: &R,
    mut planner: IncrementPlanner,
    message_template: &str,
    confirm: F,
) -> Result<IncreaseOutcome>
where
    R: Repository + ?Sized,
    F: FnOnce(&IncrementPlan) -> Result<bool>,
{
    let plan = planner.plan(repo)?;
    let confirmed = confirm(&plan)?;
    let state = planner.apply(repo, &plan, confirmed, message_template)?;

    Ok(IncreaseOutcome { plan, state })
}
