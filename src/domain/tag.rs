use std::sync::OnceLock;

use regex::Regex;

use super::version::VersionRecord;
use crate::error::{Result, VersionError};

/// Version tag pattern: `v<major>.<minor>.<patch>[-<special>[+<build>]]`
const VERSION_TAG_PATTERN: &str = r"v(?P<major>[0-9]+)\.(?P<minor>[0-9]+)\.(?P<patch>[0-9]+)(?:-(?P<special>[0-9A-Za-z.\-]+)(?:\+(?P<build>[0-9A-Za-z.\-]+))?)?";

fn version_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_TAG_PATTERN).expect("version tag pattern is valid"))
}

/// One raw line of tag history: commit id, UNIX timestamp and ref description
///
/// Fields are kept as text; nothing is validated until [`TagEntry::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub commit: String,
    pub timestamp: String,
    pub refs: String,
}

impl TagEntry {
    pub fn new(
        commit: impl Into<String>,
        timestamp: impl Into<String>,
        refs: impl Into<String>,
    ) -> Self {
        TagEntry {
            commit: commit.into(),
            timestamp: timestamp.into(),
            refs: refs.into(),
        }
    }

    /// Split a `git log --tags --pretty="%h\t%at\t%D"` line
    ///
    /// Leading whitespace, line endings and surrounding quotes are dropped.
    /// Lines without exactly three tab-separated fields yield `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line
            .trim_start()
            .trim_end_matches(['\r', '\n'])
            .trim_matches('"');
        let mut parts = line.split('\t');
        let entry = TagEntry::new(parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        Some(entry)
    }

    /// Turn this entry into a version record
    pub fn parse(&self) -> Result<VersionRecord> {
        parse_version_record(&self.commit, &self.timestamp, &self.refs)
    }
}

/// Build a version record from a commit id, a base-10 UNIX timestamp and tag text
///
/// # Returns
/// * `Ok(VersionRecord)` - The first version tag found in `tag_text`
/// * `Err(VersionError::Parse)` - Bad timestamp, no version tag, or a number
///   that does not fit
///
/// # Example
/// ```ignore
/// let v = parse_version_record("a1b2c3d", "1500000000", "tag: v1.2.3-rc1")?;
/// assert_eq!(v.to_string(), "v1.2.3-rc1");
/// ```
pub fn parse_version_record(
    commit: &str,
    timestamp: &str,
    tag_text: &str,
) -> Result<VersionRecord> {
    let timestamp = timestamp.trim().parse::<i64>().map_err(|_| {
        VersionError::parse(format!("could not parse '{}' as UNIX timestamp", timestamp))
    })?;

    Ok(parse_tag_text(tag_text)?.at_commit(commit, timestamp))
}

/// Extract the first version tag from free-form ref text
///
/// The returned record has no commit attached.
pub fn parse_tag_text(tag_text: &str) -> Result<VersionRecord> {
    let captures = version_tag_regex()
        .captures(tag_text)
        .ok_or_else(|| VersionError::parse(format!("no version tag in '{}'", tag_text)))?;

    let number = |name: &str| -> Result<u64> {
        let raw = captures.name(name).map(|m| m.as_str()).unwrap_or_default();
        raw.parse::<u64>()
            .map_err(|_| VersionError::parse(format!("error parsing {} tick '{}'", name, raw)))
    };
    let text = |name: &str| {
        captures
            .name(name)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    Ok(VersionRecord::new(number("major")?, number("minor")?, number("patch")?)
        .with_special(text("special"))
        .with_build(text("build")))
}

/// Annotated tag message for `tag`, from a template holding `{tag}`
pub fn tag_message(template: &str, tag: &str) -> String {
    template.replace("{tag}", tag)
}
