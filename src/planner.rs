//! Planning and applying a version increase
//!
//! An [IncrementPlanner] moves through
//! `Idle -> ComputingCurrent -> ValidatingTick -> ValidatingMonotonic -> AwaitingConfirmation`
//! and ends in `Applied` or `Aborted`. Every check runs before the single
//! write (the annotated tag), and request errors are caught in
//! [IncrementPlanner::new] before the repository is touched at all.

use std::fmt;

use tracing::debug;

use crate::analyzer::collect_versions;
use crate::domain::tag::tag_message;
use crate::domain::{BranchContext, HeadCommit, Tick, VersionRecord};
use crate::error::{Result, VersionError};
use crate::git::Repository;

/// What the operator asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickRequest {
    pub major: bool,
    pub minor: bool,
    pub patch: bool,
    /// Pre-release label for the new version
    pub special: Option<String>,
    /// Build metadata for the new version
    pub build: Option<String>,
}

impl TickRequest {
    /// Request a single tick
    pub fn tick(tick: Tick) -> Self {
        TickRequest {
            major: tick == Tick::Major,
            minor: tick == Tick::Minor,
            patch: tick == Tick::Patch,
            ..Default::default()
        }
    }

    pub fn with_special(mut self, special: impl Into<String>) -> Self {
        self.special = Some(special.into());
        self
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    fn special(&self) -> &str {
        self.special.as_deref().unwrap_or_default()
    }

    fn build(&self) -> &str {
        self.build.as_deref().unwrap_or_default()
    }

    /// Check the request and resolve the tick to apply
    ///
    /// # Returns
    /// * `Ok(Some(tick))` - Increase one level; patch when nothing was asked for
    /// * `Ok(None)` - Only a pre-release label was given; keep the release triple
    /// * `Err(VersionError::Config)` - More than one level, build metadata
    ///   without a label, or labels that are not valid SemVer identifiers
    pub fn validate(&self) -> Result<Option<Tick>> {
        let tick = match (self.major, self.minor, self.patch) {
            (true, false, false) => Some(Tick::Major),
            (false, true, false) => Some(Tick::Minor),
            (false, false, true) => Some(Tick::Patch),
            (false, false, false) if !self.special().is_empty() => None,
            (false, false, false) => Some(Tick::Patch),
            _ => {
                return Err(VersionError::config(
                    "cannot increase more than one level: choose major, minor or patch",
                ))
            }
        };

        if !self.build().is_empty() && self.special().is_empty() {
            return Err(VersionError::config(
                "build metadata requires a pre-release label",
            ));
        }
        if !self.special().is_empty() {
            semver::Prerelease::new(self.special()).map_err(|e| {
                VersionError::config(format!("invalid pre-release '{}': {}", self.special(), e))
            })?;
        }
        if !self.build().is_empty() {
            semver::BuildMetadata::new(self.build()).map_err(|e| {
                VersionError::config(format!("invalid build metadata '{}': {}", self.build(), e))
            })?;
        }

        Ok(tick)
    }
}

/// Where an [IncrementPlanner] currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanState {
    Idle,
    ComputingCurrent,
    ValidatingTick,
    ValidatingMonotonic,
    AwaitingConfirmation,
    Applied,
    Aborted,
}

impl fmt::Display for PlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlanState::Idle => "idle",
            PlanState::ComputingCurrent => "computing current version",
            PlanState::ValidatingTick => "validating tick",
            PlanState::ValidatingMonotonic => "validating monotonicity",
            PlanState::AwaitingConfirmation => "awaiting confirmation",
            PlanState::Applied => "applied",
            PlanState::Aborted => "aborted",
        };
        write!(f, "{}", name)
    }
}

/// A validated increase, ready to be confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct IncrementPlan {
    /// Highest existing version (the sentinel when there is none)
    pub current: VersionRecord,
    /// Version to be tagged on `head`
    pub candidate: VersionRecord,
    pub head: HeadCommit,
    pub branch: BranchContext,
}

impl IncrementPlan {
    /// Name of the tag to be created
    pub fn tag_name(&self) -> String {
        self.candidate.tag_name()
    }
}

/// Computes, validates and applies one version increase
#[derive(Debug)]
pub struct IncrementPlanner {
    request: TickRequest,
    tick: Option<Tick>,
    state: PlanState,
}

impl IncrementPlanner {
    /// Validate the request; nothing touches a repository yet
    pub fn new(request: TickRequest) -> Result<Self> {
        let tick = request.validate()?;
        Ok(IncrementPlanner {
            request,
            tick,
            state: PlanState::Idle,
        })
    }

    pub fn state(&self) -> PlanState {
        self.state
    }

    /// Tick that will be applied, `None` for a label-only change
    pub fn tick(&self) -> Option<Tick> {
        self.tick
    }

    /// Candidate version built on `current` for the commit `head`
    pub fn candidate(
        &self,
        current: &VersionRecord,
        head: &HeadCommit,
    ) -> Result<VersionRecord> {
        let triple = match self.tick {
            Some(tick) => current.bump(tick)?,
            None => current.release_triple(),
        };

        Ok(triple
            .with_special(self.request.special())
            .with_build(self.request.build())
            .at_commit(head.hash.clone(), head.timestamp))
    }

    /// Work out the next version for `repo` and check it may be applied
    ///
    /// # Returns
    /// * `Ok(IncrementPlan)` - Planner is now awaiting confirmation
    /// * `Err(VersionError::AlreadyVersioned)` - HEAD already carries a version
    /// * `Err(VersionError::Monotonicity)` - Candidate does not exceed the current version
    /// * `Err(VersionError::Parse)` - The ticked number cannot be increased
    /// * `Err` - Repository could not be read
    pub fn plan<R: Repository + ?Sized>(&mut self, repo: &R) -> Result<IncrementPlan> {
        let result = self.try_plan(repo);
        if result.is_err() {
            self.transition(PlanState::Aborted);
        }
        result
    }

    fn try_plan<R: Repository + ?Sized>(&mut self, repo: &R) -> Result<IncrementPlan> {
        if self.state != PlanState::Idle {
            return Err(VersionError::config(format!(
                "cannot plan an increase while {}",
                self.state
            )));
        }

        self.transition(PlanState::ComputingCurrent);
        let current = collect_versions(repo)?.highest();
        let head = repo.head_commit()?;
        let branch = repo.active_branch()?;

        self.transition(PlanState::ValidatingTick);
        let head_version = head.version();
        if !head_version.is_sentinel() {
            return Err(VersionError::AlreadyVersioned {
                commit: head.short_hash().to_string(),
                version: head_version.to_string(),
            });
        }
        let candidate = self.candidate(&current, &head)?;

        self.transition(PlanState::ValidatingMonotonic);
        if !candidate.larger(&current) || candidate.tag_name() == current.tag_name() {
            return Err(VersionError::Monotonicity {
                candidate: candidate.to_string(),
                current: current.to_string(),
            });
        }

        self.transition(PlanState::AwaitingConfirmation);
        Ok(IncrementPlan {
            current,
            candidate,
            head,
            branch,
        })
    }

    /// Write the planned tag if the operator confirmed
    ///
    /// `message_template` is the annotation message with `{tag}` as placeholder.
    ///
    /// # Returns
    /// * `Ok(PlanState::Applied)` - Tag written
    /// * `Ok(PlanState::Aborted)` - Not confirmed; nothing written
    /// * `Err` - No plan awaiting confirmation, or the write failed
    pub fn apply<R: Repository + ?Sized>(
        &mut self,
        repo: &R,
        plan: &IncrementPlan,
        confirmed: bool,
        message_template: &str,
    ) -> Result<PlanState> {
        if self.state != PlanState::AwaitingConfirmation {
            return Err(VersionError::config(format!(
                "cannot apply an increase while {}",
                self.state
            )));
        }

        if !confirmed {
            self.transition(PlanState::Aborted);
            return Ok(self.state);
        }

        let tag = plan.tag_name();
        let message = tag_message(message_template, &tag);
        if let Err(e) = repo.create_annotated_tag(&tag, &plan.head.hash, &message) {
            self.transition(PlanState::Aborted);
            return Err(e);
        }

        self.transition(PlanState::Applied);
        Ok(self.state)
    }

    fn transition(&mut self, next: PlanState) {
        debug!(from = %self.state, to = %next, "increment planner");
        self.state = next;
    }
}
