use std::path::{Path, PathBuf};

use git2::{Commit, Repository as Git2Repo};
use tracing::debug;

use crate::domain::{BranchContext, HeadCommit, TagEntry};
use crate::error::{Result, VersionError};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    path: PathBuf,
}

impl Git2Repository {
    /// Open the repository whose working tree root is `path`
    ///
    /// Unlike discovery, parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open(path).map_err(|e| VersionError::repository(path, e))?;

        Ok(Git2Repository {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        let path = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();
        Git2Repository { repo, path }
    }

    /// Every tag that resolves to a commit, as `(tag name, commit)`
    fn tagged_commits(&self) -> Result<Vec<(String, Commit<'_>)>> {
        let names = self.repo.tag_names(None)?;
        let mut tagged = Vec::new();

        for name in names.iter().flatten() {
            let commit = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .and_then(|reference| reference.peel_to_commit());

            match commit {
                Ok(commit) => tagged.push((name.to_string(), commit)),
                Err(e) => debug!(tag = name, error = %e, "tag does not point at a commit"),
            }
        }

        Ok(tagged)
    }
}

impl super::Repository for Git2Repository {
    fn path(&self) -> &Path {
        &self.path
    }

    fn tag_history(&self) -> Result<Vec<TagEntry>> {
        let mut entries = Vec::new();

        for (name, commit) in self.tagged_commits()? {
            let short_id = commit.as_object().short_id()?;
            entries.push(TagEntry::new(
                short_id.as_str().unwrap_or_default(),
                commit.time().seconds().to_string(),
                format!("tag: {}", name),
            ));
        }

        Ok(entries)
    }

    fn head_commit(&self) -> Result<HeadCommit> {
        let head = self.repo.head()?;
        let commit = head.peel_to_commit()?;

        let mut decorations = Vec::new();
        match head.shorthand() {
            Some(branch) if head.is_branch() => decorations.push(format!("HEAD -> {}", branch)),
            _ => decorations.push("HEAD".to_string()),
        }
        for (name, tagged) in self.tagged_commits()? {
            if tagged.id() == commit.id() {
                decorations.push(format!("tag: {}", name));
            }
        }

        let author = commit.author().name().unwrap_or("unknown").to_string();
        let subject = commit.summary().unwrap_or_default().to_string();

        Ok(HeadCommit {
            hash: commit.id().to_string(),
            timestamp: commit.time().seconds(),
            author,
            refs: decorations.join(", "),
            subject,
        })
    }

    fn active_branch(&self) -> Result<BranchContext> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Ok(BranchContext::detached());
        }

        head.shorthand()
            .map(BranchContext::new)
            .ok_or_else(|| VersionError::repository(&self.path, "branch name is not valid UTF-8"))
    }

    fn create_annotated_tag(&self, name: &str, commit: &str, message: &str) -> Result<()> {
        let object = self.repo.revparse_single(commit)?;
        let tagger = self.repo.signature()?;

        self.repo.tag(name, &object, &tagger, message, false)?;

        Ok(())
    }
}
