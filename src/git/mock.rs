use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::domain::{BranchContext, HeadCommit, TagEntry};
use crate::error::{Result, VersionError};
use crate::git::Repository;

/// Annotated tag recorded by [MockRepository::create_annotated_tag]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTag {
    pub name: String,
    pub commit: String,
    pub message: String,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    path: PathBuf,
    history: RefCell<Vec<TagEntry>>,
    head: Option<HeadCommit>,
    branch: Option<BranchContext>,
    created: RefCell<Vec<CreatedTag>>,
    unreadable: bool,
}

impl MockRepository {
    /// Create an empty mock repository rooted at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MockRepository {
            path: path.into(),
            history: RefCell::new(Vec::new()),
            head: None,
            branch: Some(BranchContext::new("main")),
            created: RefCell::new(Vec::new()),
            unreadable: false,
        }
    }

    /// Load history from `git log --tags --pretty="%h\t%at\t%D"` output
    ///
    /// Lines that do not have three fields are dropped, as git would never
    /// hand them to the parser either.
    pub fn with_log(mut self, log: &str) -> Self {
        self.history
            .get_mut()
            .extend(log.lines().filter_map(TagEntry::from_line));
        self
    }

    /// Add a tag on `commit`
    pub fn add_tag(&mut self, commit: &str, timestamp: i64, tag: &str) {
        self.history.get_mut().push(TagEntry::new(
            commit,
            timestamp.to_string(),
            format!("tag: {}", tag),
        ));
    }

    /// Move HEAD to a new commit
    ///
    /// The ref decoration is derived from the tags already recorded on `hash`.
    pub fn set_head(&mut self, hash: &str, timestamp: i64, author: &str, subject: &str) {
        let mut refs = vec![format!("HEAD -> {}", self.branch_name())];
        refs.extend(
            self.history
                .get_mut()
                .iter()
                .filter(|entry| hash.starts_with(entry.commit.as_str()))
                .map(|entry| entry.refs.clone()),
        );

        self.head = Some(HeadCommit {
            hash: hash.to_string(),
            timestamp,
            author: author.to_string(),
            refs: refs.join(", "),
            subject: subject.to_string(),
        });
    }

    /// Set the active branch from `git branch` output
    pub fn set_branch_listing(&mut self, listing: &str) {
        self.branch = BranchContext::from_listing(listing);
    }

    /// Make every history read fail
    pub fn unreadable(mut self) -> Self {
        self.unreadable = true;
        self
    }

    /// Tags created so far, oldest first
    pub fn created_tags(&self) -> Vec<CreatedTag> {
        self.created.borrow().clone()
    }

    fn branch_name(&self) -> String {
        self.branch
            .as_ref()
            .map(|b| b.name.clone())
            .unwrap_or_else(|| "HEAD".to_string())
    }
}

impl Repository for MockRepository {
    fn path(&self) -> &Path {
        &self.path
    }

    fn tag_history(&self) -> Result<Vec<TagEntry>> {
        if self.unreadable {
            return Err(VersionError::repository(&self.path, "could not list versions"));
        }
        Ok(self.history.borrow().clone())
    }

    fn head_commit(&self) -> Result<HeadCommit> {
        self.head
            .clone()
            .ok_or_else(|| VersionError::repository(&self.path, "repository has no commits"))
    }

    fn active_branch(&self) -> Result<BranchContext> {
        self.branch
            .clone()
            .ok_or_else(|| VersionError::repository(&self.path, "could not determine active branch"))
    }

    fn create_annotated_tag(&self, name: &str, commit: &str, message: &str) -> Result<()> {
        let exists = self
            .history
            .borrow()
            .iter()
            .any(|entry| entry.refs == format!("tag: {}", name));
        if exists {
            return Err(VersionError::repository(
                &self.path,
                format!("tag '{}' already exists", name),
            ));
        }

        self.history.borrow_mut().push(TagEntry::new(
            commit,
            self.head
                .as_ref()
                .map(|head| head.timestamp)
                .unwrap_or_default()
                .to_string(),
            format!("tag: {}", name),
        ));
        self.created.borrow_mut().push(CreatedTag {
            name: name.to_string(),
            commit: commit.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
