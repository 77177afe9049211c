//! Populate and publish strategies
//!
//! Each strategy is a closed set of alternatives chosen when the workspace is
//! configured. They are plain enums tagged by `type` in configuration files.

use crate::revision::RevisionSpec;
use serde::{Deserialize, Serialize};

/// Options shared by every populate strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulateOptions {
    /// Record synced revisions in the server's have list
    #[serde(default = "default_true")]
    pub have: bool,

    /// Force resync of files already present
    #[serde(default)]
    pub force: bool,

    /// Suppress per-file output
    #[serde(default = "default_true")]
    pub quiet: bool,

    /// Parallel sync threads (None = serial)
    #[serde(default)]
    pub parallel: Option<u32>,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            have: true,
            force: false,
            quiet: true,
            parallel: None,
        }
    }
}

/// How files are materialized into the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Populate {
    /// Revert and clean local edits, then sync
    AutoClean {
        #[serde(default)]
        options: PopulateOptions,
    },
    /// Revert everything and force a full resync
    ForceClean {
        #[serde(default)]
        options: PopulateOptions,
    },
    /// Plain sync, optionally reverting opened files first
    SyncOnly {
        #[serde(default)]
        options: PopulateOptions,
        #[serde(default)]
        revert: bool,
    },
    /// Update the have list without transferring files
    FlushOnly {
        #[serde(default)]
        options: PopulateOptions,
    },
    /// Preview the sync without changing anything
    CheckOnly {
        #[serde(default)]
        options: PopulateOptions,
    },
    /// Sync classic and graph depots together
    GraphHybrid {
        #[serde(default)]
        options: PopulateOptions,
    },
}

impl Default for Populate {
    fn default() -> Self {
        Populate::AutoClean {
            options: PopulateOptions::default(),
        }
    }
}

impl Populate {
    pub fn options(&self) -> &PopulateOptions {
        match self {
            Populate::AutoClean { options }
            | Populate::ForceClean { options }
            | Populate::SyncOnly { options, .. }
            | Populate::FlushOnly { options }
            | Populate::CheckOnly { options }
            | Populate::GraphHybrid { options } => options,
        }
    }

    /// Commands that must run before the sync, for `client_path` (`//ws/...`)
    pub fn pre_sync_args(&self, client_path: &str) -> Vec<Vec<String>> {
        match self {
            Populate::AutoClean { .. } => vec![
                args(&["revert", client_path]),
                args(&["clean", client_path]),
            ],
            Populate::ForceClean { .. } => vec![args(&["revert", "-k", client_path])],
            Populate::SyncOnly { revert: true, .. } => vec![args(&["revert", client_path])],
            _ => Vec::new(),
        }
    }

    /// `sync` argument list for `client_path` at `revision`
    pub fn sync_args(&self, client_path: &str, revision: &RevisionSpec) -> Vec<String> {
        let options = self.options();
        let mut out = vec!["sync".to_string()];

        match self {
            Populate::FlushOnly { .. } => out.push("-k".into()),
            Populate::CheckOnly { .. } => out.push("-n".into()),
            _ => {}
        }
        if options.force || matches!(self, Populate::ForceClean { .. }) {
            out.push("-f".into());
        }
        if !options.have {
            out.push("-p".into());
        }
        if options.quiet {
            out.push("-q".into());
        }
        if let Some(threads) = options.parallel.filter(|n| *n > 1) {
            out.push(format!("--parallel=threads={}", threads));
        }

        out.push(format!("{}{}", client_path, revision.sync_revision()));
        out
    }

    /// True if the strategy leaves workspace files untouched
    pub fn is_preview(&self) -> bool {
        matches!(self, Populate::CheckOnly { .. })
    }
}

/// What happens to workspace changes after a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Publish {
    Submit {
        description: String,
        /// Reopen files after submit
        #[serde(default)]
        reopen: bool,
        /// Keep only this many revisions of each submitted file (`+S<n>`)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        purge: Option<u32>,
    },
    Shelve {
        description: String,
        /// Revert the workspace after shelving
        #[serde(default)]
        revert: bool,
    },
    /// Commit to a graph depot
    Commit { description: String },
}

impl Publish {
    pub fn description(&self) -> &str {
        match self {
            Publish::Submit { description, .. }
            | Publish::Shelve { description, .. }
            | Publish::Commit { description } => description,
        }
    }

    /// Filetype change applied before submitting, if purging is requested
    pub fn pre_publish_args(&self, client_path: &str) -> Option<Vec<String>> {
        match self {
            Publish::Submit {
                purge: Some(revisions),
                ..
            } if *revisions > 0 => Some(vec![
                "reopen".to_string(),
                "-t".to_string(),
                format!("+S{}", revisions),
                client_path.to_string(),
            ]),
            _ => None,
        }
    }

    pub fn publish_args(&self) -> Vec<String> {
        match self {
            Publish::Submit { description, reopen, .. } => {
                let mut out = args(&["submit", "-d", description]);
                if *reopen {
                    out.push("-r".into());
                }
                out
            }
            Publish::Shelve { description, .. } => args(&["shelve", "-d", description]),
            Publish::Commit { description } => args(&["submit", "-d", description]),
        }
    }

    /// Cleanup after publishing, if the strategy asks for one
    pub fn post_publish_args(&self, client_path: &str) -> Option<Vec<String>> {
        match self {
            Publish::Shelve { revert: true, .. } => Some(args(&["revert", "-k", client_path])),
            _ => None,
        }
    }
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

fn default_true() -> bool {
    true
}
