//! Retrieval of earlier versions of a presentation from version control.

mod git;

pub use git::{RetrievedRevision, repository_root, retrieve_revision};

use crate::error::{DeckDiffError, Result};
use std::fmt;

/// Which earlier version of a file to compare against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionSpec {
    /// Any revision git understands (`HEAD`, `HEAD~2`, a tag, a hash)
    Commit(String),
    /// Head of a pending pull request, fetched from `remote`
    PullRequest { number: u64, remote: String },
}

impl RevisionSpec {
    #[must_use]
    pub fn head() -> Self {
        Self::Commit("HEAD".to_string())
    }

    /// Reject revisions and remotes git would parse as options.
    pub fn check(&self) -> Result<()> {
        let (what, value) = match self {
            Self::Commit(rev) => ("revision", rev.as_str()),
            Self::PullRequest { remote, .. } => ("remote", remote.as_str()),
        };
        if value.is_empty() || value.starts_with('-') {
            return Err(DeckDiffError::validation(format!("invalid {what}: '{value}'")));
        }
        Ok(())
    }
}

impl Default for RevisionSpec {
    fn default() -> Self {
        Self::head()
    }
}

impl fmt::Display for RevisionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commit(rev) => f.write_str(rev),
            Self::PullRequest { number, .. } => write!(f, "PR#{number}"),
        }
    }
}
