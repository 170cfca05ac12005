use super::tag::parse_tag_text;
use super::version::VersionRecord;
use crate::error::{Result, VersionError};

/// The commit a new version would be attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadCommit {
    pub hash: String,
    pub timestamp: i64,
    pub author: String,
    /// Ref decoration, e.g. `HEAD -> main, tag: v1.0.0`
    pub refs: String,
    pub subject: String,
}

impl HeadCommit {
    /// Parse a `git log -1 --pretty="%H\t%at\t%an\t%d\t%s"` line
    pub fn parse_line(line: &str) -> Result<Self> {
        let line = line
            .trim_start()
            .trim_end_matches(['\r', '\n'])
            .trim_matches('"');
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != 5 {
            return Err(VersionError::parse(format!(
                "invalid commit line: expected 5 fields, found {}",
                parts.len()
            )));
        }

        let timestamp = parts[1].trim().parse::<i64>().map_err(|_| {
            VersionError::parse(format!("could not parse '{}' as UNIX timestamp", parts[1]))
        })?;

        Ok(HeadCommit {
            hash: parts[0].to_string(),
            timestamp,
            author: parts[2].to_string(),
            refs: parts[3].trim().to_string(),
            subject: parts[4].to_string(),
        })
    }

    /// Tag names in the ref decoration; branch and remote refs are left out
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.refs
            .trim_matches(|c| c == '(' || c == ')')
            .split(',')
            .filter_map(|decoration| decoration.trim().strip_prefix("tag: "))
    }

    /// Highest version tagged on this commit, or the sentinel when it carries none
    pub fn version(&self) -> VersionRecord {
        self.tag_names()
            .filter_map(|name| parse_tag_text(name).ok())
            .max_by(|a, b| a.precedence(b))
            .unwrap_or_else(VersionRecord::sentinel)
            .at_commit(self.hash.clone(), self.timestamp)
    }

    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}
