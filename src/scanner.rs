//! Recursive discovery of repositories and their versions
//!
//! The scanner walks a directory tree, treats every directory holding the
//! version-control marker as a repository root (without looking further
//! inside it), and reads each root's versions in turn. One unreadable
//! repository never aborts the scan; it is left out of the index and noted as
//! a [BoundaryWarning].

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::analyzer::collect_versions;
use crate::boundary::BoundaryWarning;
use crate::config::ScanConfig;
use crate::domain::VersionCollection;
use crate::error::{Result, VersionError};
use crate::git::Repository;

/// Versions of every repository found under a scan root
///
/// Repositories are kept in ascending path order.
#[derive(Debug, Clone, Default)]
pub struct RepositoryIndex {
    entries: Vec<(PathBuf, VersionCollection)>,
    warnings: Vec<BoundaryWarning>,
}

impl RepositoryIndex {
    pub fn new() -> Self {
        RepositoryIndex::default()
    }

    /// Index holding a single repository
    pub fn single(path: impl Into<PathBuf>, versions: VersionCollection) -> Self {
        let mut index = RepositoryIndex::new();
        index.insert(path, versions);
        index
    }

    /// Add or replace the collection for `path`
    pub fn insert(&mut self, path: impl Into<PathBuf>, versions: VersionCollection) {
        let path = path.into();
        match self
            .entries
            .binary_search_by(|(existing, _)| existing.as_os_str().cmp(path.as_os_str()))
        {
            Ok(i) => self.entries[i].1 = versions,
            Err(i) => self.entries.insert(i, (path, versions)),
        }
    }

    pub fn get(&self, path: &Path) -> Option<&VersionCollection> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == path)
            .map(|(_, versions)| versions)
    }

    /// Repositories and their versions, ascending by path
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &VersionCollection)> {
        self.entries
            .iter()
            .map(|(path, versions)| (path.as_path(), versions))
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.entries.iter().map(|(path, _)| path.as_path()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reduce every collection to its highest version
    pub fn highest_only(mut self) -> Self {
        for (_, versions) in &mut self.entries {
            versions.truncate(1);
        }
        self
    }

    /// Total number of versions across all repositories
    pub fn version_count(&self) -> usize {
        self.entries.iter().map(|(_, versions)| versions.len()).sum()
    }

    pub fn warnings(&self) -> &[BoundaryWarning] {
        &self.warnings
    }

    fn warn(&mut self, warning: BoundaryWarning) {
        self.warnings.push(warning);
    }
}

/// Walks directory trees looking for repository roots
#[derive(Debug, Clone)]
pub struct RepositoryScanner {
    marker: String,
    include_hidden: bool,
}

impl RepositoryScanner {
    /// Scanner recognising roots by `marker` (e.g. `.git`)
    pub fn new(marker: impl Into<String>) -> Self {
        RepositoryScanner {
            marker: marker.into(),
            include_hidden: false,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        RepositoryScanner {
            marker: config.marker.clone(),
            include_hidden: config.include_hidden,
        }
    }

    /// Also descend into directories whose name starts with `.`
    pub fn include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    /// Find repository roots under `root`, ascending by path
    ///
    /// A directory holding the marker is reported and not descended into, so
    /// repositories nested inside another repository are not found.
    /// Unreadable directories are skipped.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(VersionError::repository(root, "not a directory"));
        }

        let mut roots = Vec::new();
        let mut walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        loop {
            let entry = match walker.next() {
                None => break,
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    debug!(error = %e, "skipping unreadable directory");
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if entry.depth() > 0 && !self.include_hidden && is_hidden(&entry) {
                walker.skip_current_dir();
                continue;
            }

            if entry.path().join(&self.marker).exists() {
                roots.push(entry.path().to_path_buf());
                walker.skip_current_dir();
            }
        }

        roots.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        Ok(roots)
    }

    /// Discover repositories under `root` and collect the versions of each
    ///
    /// `open` produces a repository handle for a discovered root. Roots that
    /// cannot be opened or read are left out of the index with a warning.
    ///
    /// # Returns
    /// * `Ok(RepositoryIndex)` - Versions per readable repository
    /// * `Err` - Only if `root` itself is not a directory
    pub fn scan<F, R>(&self, root: &Path, mut open: F) -> Result<RepositoryIndex>
    where
        F: FnMut(&Path) -> Result<R>,
        R: Repository,
    {
        let mut index = RepositoryIndex::new();

        for path in self.discover(root)? {
            match open(&path).and_then(|repo| collect_versions(&repo)) {
                Ok(versions) => {
                    if versions.is_empty() {
                        index.warn(BoundaryWarning::NoVersions { path: path.clone() });
                    }
                    index.insert(path, versions);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping repository");
                    index.warn(BoundaryWarning::UnreadableRepository {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(index)
    }
}

impl Default for RepositoryScanner {
    fn default() -> Self {
        RepositoryScanner::from_config(&ScanConfig::default())
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
