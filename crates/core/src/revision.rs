//! Revision specs and changelist metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a sync request pins the workspace to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevisionSpec {
    /// Submitted changelist number
    ChangelistNumber { change: u64 },
    /// Named label
    Label { name: String },
    /// Latest revision of every file
    Head,
    /// Shelved files of a pending review, unshelved on top of `base`
    ShelvedReview { review: u64, base: u64 },
}

impl RevisionSpec {
    pub fn change(change: u64) -> Self {
        RevisionSpec::ChangelistNumber { change }
    }

    pub fn label(name: impl Into<String>) -> Self {
        RevisionSpec::Label { name: name.into() }
    }

    pub fn review(review: u64, base: u64) -> Self {
        RevisionSpec::ShelvedReview { review, base }
    }

    /// Label and review requests are explicit pins that skip polling filters
    pub fn is_explicit_pin(&self) -> bool {
        matches!(self, RevisionSpec::Label { .. } | RevisionSpec::ShelvedReview { .. })
    }

    /// Revision the files are synced to before any unshelve
    pub fn sync_revision(&self) -> String {
        match self {
            RevisionSpec::ShelvedReview { base, .. } => format!("@{}", base),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for RevisionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevisionSpec::ChangelistNumber { change } => write!(f, "@{}", change),
            RevisionSpec::Label { name } => write!(f, "@{}", name),
            RevisionSpec::Head => f.write_str("#head"),
            RevisionSpec::ShelvedReview { review, .. } => write!(f, "@={}", review),
        }
    }
}

/// Changelist metadata as returned by the depot query service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelist {
    pub id: u64,
    pub author: String,
    /// Submit time, unix seconds
    #[serde(default)]
    pub timestamp: i64,
    /// Depot paths of the affected files
    #[serde(default)]
    pub files: Vec<String>,
}

impl Changelist {
    pub fn new(id: u64, author: impl Into<String>, files: &[&str]) -> Self {
        Self {
            id,
            author: author.into(),
            timestamp: 0,
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }
}
