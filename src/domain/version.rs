use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Local};

use super::prerelease::PreRelease;
use crate::error::{Result, VersionError};

/// A semantic version found on (or planned for) a specific commit
///
/// Records are immutable once built; the `with_*`/`at_commit` methods return
/// new values. `v0.0.0` without label or build metadata is the sentinel for
/// "no version exists".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionRecord {
    major: u64,
    minor: u64,
    patch: u64,
    special: String,
    build: String,
    commit: String,
    timestamp: i64,
}

impl VersionRecord {
    /// Create a release version with no provenance
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionRecord {
            major,
            minor,
            patch,
            ..Default::default()
        }
    }

    /// The `v0.0.0` sentinel
    pub fn sentinel() -> Self {
        VersionRecord::default()
    }

    /// Set the pre-release label
    pub fn with_special(mut self, special: impl Into<String>) -> Self {
        self.special = special.into();
        self
    }

    /// Set the build metadata
    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = build.into();
        self
    }

    /// Attach the commit the version belongs to
    pub fn at_commit(mut self, commit: impl Into<String>, timestamp: i64) -> Self {
        self.commit = commit.into();
        self.timestamp = timestamp;
        self
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Pre-release label exactly as tagged
    pub fn special(&self) -> &str {
        &self.special
    }

    /// Build metadata exactly as tagged
    pub fn build(&self) -> &str {
        &self.build
    }

    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Commit time in seconds since the UNIX epoch
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Commit time in the local timezone
    pub fn date(&self) -> Option<DateTime<Local>> {
        DateTime::from_timestamp(self.timestamp, 0).map(|utc| utc.with_timezone(&Local))
    }

    pub fn is_sentinel(&self) -> bool {
        self.major == 0
            && self.minor == 0
            && self.patch == 0
            && self.special.is_empty()
            && self.build.is_empty()
    }

    /// True for versions without a pre-release label
    pub fn is_release(&self) -> bool {
        self.special.is_empty()
    }

    /// Normalized pre-release label
    pub fn pre_release(&self) -> PreRelease {
        PreRelease::parse(&self.special)
    }

    /// Tag name for this version, e.g. `v1.2.3-rc1+build5`
    ///
    /// Build metadata is only written after a pre-release label, as the tag
    /// grammar has no place for it on a release.
    pub fn tag_name(&self) -> String {
        self.to_string()
    }

    /// Total precedence order between two records
    ///
    /// Release triple first, then the pre-release label by SemVer rules. Build
    /// metadata never takes part. Records that are still indistinguishable are
    /// ordered by commit time, later being greater; this departs from SemVer so
    /// that two commits never count as carrying the same version.
    pub fn precedence(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| self.pre_release().cmp(&other.pre_release()))
            .then(self.timestamp.cmp(&other.timestamp))
    }

    /// Whether `self` strictly outranks `other`
    pub fn larger(&self, other: &Self) -> bool {
        self.precedence(other) == Ordering::Greater
    }

    /// Apply a tick to the release triple
    ///
    /// The result carries no label, build metadata or commit.
    ///
    /// # Returns
    /// * `Ok(VersionRecord)` - The increased triple
    /// * `Err(VersionError::Parse)` - The ticked number is already `u64::MAX`
    pub fn bump(&self, tick: Tick) -> Result<Self> {
        let level = match tick {
            Tick::Major => self.major,
            Tick::Minor => self.minor,
            Tick::Patch => self.patch,
        };
        let next = level.checked_add(1).ok_or_else(|| {
            VersionError::parse(format!("{} number of {} cannot be increased", tick, self))
        })?;

        Ok(match tick {
            Tick::Major => VersionRecord::new(next, 0, 0),
            Tick::Minor => VersionRecord::new(self.major, next, 0),
            Tick::Patch => VersionRecord::new(self.major, self.minor, next),
        })
    }

    /// Same release triple, nothing else
    pub fn release_triple(&self) -> Self {
        VersionRecord::new(self.major, self.minor, self.patch)
    }
}

/// Whether `v` strictly outranks `w`; see [`VersionRecord::precedence`]
pub fn larger(v: &VersionRecord, w: &VersionRecord) -> bool {
    v.larger(w)
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.special.is_empty() {
            return Ok(());
        }
        write!(f, "-{}", self.special)?;
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

/// Increment applied to one level of the release triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tick::Major => write!(f, "major"),
            Tick::Minor => write!(f, "minor"),
            Tick::Patch => write!(f, "patch"),
        }
    }
}
