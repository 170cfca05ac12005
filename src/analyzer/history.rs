use tracing::debug;

use crate::domain::{TagEntry, VersionCollection};
use crate::error::Result;
use crate::git::Repository;

/// Read a repository's tag history and build its sorted version collection
///
/// Entries that are not version tags are skipped. A failure to read the
/// history at all is returned to the caller, who decides whether it is fatal.
pub fn collect_versions<R: Repository + ?Sized>(repo: &R) -> Result<VersionCollection> {
    let entries = repo.tag_history()?;
    let versions = versions_from_entries(&entries);

    debug!(
        path = %repo.path().display(),
        entries = entries.len(),
        versions = versions.len(),
        "collected versions"
    );

    Ok(versions)
}

/// Parse every entry, dropping the ones that do not hold a version
pub fn versions_from_entries(entries: &[TagEntry]) -> VersionCollection {
    entries
        .iter()
        .filter_map(|entry| match entry.parse() {
            Ok(version) => Some(version),
            Err(e) => {
                debug!(commit = %entry.commit, error = %e, "skipping tag entry");
                None
            }
        })
        .collect()
}

/// Parse `git log --tags --pretty="%h\t%at\t%D"` output
pub fn versions_from_log(log: &str) -> VersionCollection {
    let entries: Vec<TagEntry> = log.lines().filter_map(TagEntry::from_line).collect();
    versions_from_entries(&entries)
}
