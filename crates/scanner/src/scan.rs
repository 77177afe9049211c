//! Marker-file branch scanning
//!
//! Starting from the directory holding an affected file, each ancestor is
//! checked for a marker file (a build file, say). The deepest ancestor holding
//! the marker is the branch root: its name is the branch and its parent is the
//! project root. The scanner does no I/O of its own; existence checks go
//! through an injected capability, and a failed check only means "not here".

use crate::cancel::CancelToken;
use async_trait::async_trait;
use depot_core::{Changelist, DepotPath};

/// Depot connection capability: does this depot file exist?
pub trait ExistsCheck {
    fn exists(&self, path: &str) -> anyhow::Result<bool>;
}

impl<F> ExistsCheck for F
where
    F: Fn(&str) -> anyhow::Result<bool>,
{
    fn exists(&self, path: &str) -> anyhow::Result<bool> {
        self(path)
    }
}

/// Awaitable form of `ExistsCheck` for network-backed connections
#[async_trait]
pub trait AsyncExistsCheck: Send + Sync {
    async fn exists(&self, path: &str) -> anyhow::Result<bool>;
}

/// Branch and project root of a change, both absent when undetermined
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchScanResult {
    pub branch: Option<String>,
    pub project_root: Option<DepotPath>,
}

impl BranchScanResult {
    pub fn is_empty(&self) -> bool {
        self.branch.is_none() && self.project_root.is_none()
    }

    fn found(affected: &DepotPath, depth: usize) -> Self {
        Self {
            branch: affected.segments().get(depth - 1).cloned(),
            project_root: affected.prefix(depth - 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("branch scan cancelled")]
    Cancelled,
}

/// Marker lookups from the deepest ancestor up to the top-level directory
///
/// Yields `(depth, marker path)`; empty for paths with fewer than two segments.
fn marker_paths<'a>(affected: &'a DepotPath, marker: &'a str) -> impl Iterator<Item = (usize, String)> + 'a {
    let segments = affected.segments();
    let deepest = if segments.len() < 2 || marker.is_empty() {
        0
    } else {
        segments.len() - 1
    };

    (1..=deepest)
        .rev()
        .map(move |depth| (depth, format!("//{}/{}", segments[..depth].join("/"), marker)))
}

fn normalize_marker(marker: &str) -> &str {
    marker.trim().trim_start_matches('/')
}

/// Find the branch root of `affected`
pub fn scan<C>(affected: &DepotPath, marker_file: &str, check: &C) -> BranchScanResult
where
    C: ExistsCheck + ?Sized,
{
    scan_with_cancel(affected, marker_file, check, &CancelToken::new()).unwrap_or_default()
}

/// `scan`, stopping before the next lookup once `cancel` fires
pub fn scan_with_cancel<C>(
    affected: &DepotPath,
    marker_file: &str,
    check: &C,
    cancel: &CancelToken,
) -> crate::Result<BranchScanResult>
where
    C: ExistsCheck + ?Sized,
{
    let marker = normalize_marker(marker_file);

    for (depth, candidate) in marker_paths(affected, marker) {
        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }
        if check_outcome(&candidate, check.exists(&candidate)) {
            return Ok(BranchScanResult::found(affected, depth));
        }
    }

    tracing::debug!(path = %affected, marker, "no branch marker found");
    Ok(BranchScanResult::default())
}

/// Async `scan_with_cancel`; the check's own timeouts and errors pass through
/// as misses
pub async fn scan_async(
    affected: &DepotPath,
    marker_file: &str,
    check: &dyn AsyncExistsCheck,
    cancel: &CancelToken,
) -> crate::Result<BranchScanResult> {
    let marker = normalize_marker(marker_file);

    for (depth, candidate) in marker_paths(affected, marker) {
        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }
        let outcome = check.exists(&candidate).await;
        if check_outcome(&candidate, outcome) {
            return Ok(BranchScanResult::found(affected, depth));
        }
    }

    tracing::debug!(path = %affected, marker, "no branch marker found");
    Ok(BranchScanResult::default())
}

/// Scan using the first affected file of `change` as representative
pub fn scan_changelist<C>(change: &Changelist, marker_file: &str, check: &C) -> BranchScanResult
where
    C: ExistsCheck + ?Sized,
{
    let Some(first) = change.files.first() else {
        return BranchScanResult::default();
    };

    match DepotPath::parse(first) {
        Ok(path) => scan(&path, marker_file, check),
        Err(err) => {
            tracing::debug!(change = change.id, error = %err, "unparseable affected file");
            BranchScanResult::default()
        }
    }
}

fn check_outcome(candidate: &str, outcome: anyhow::Result<bool>) -> bool {
    match outcome {
        Ok(found) => found,
        Err(err) => {
            tracing::debug!(path = candidate, error = %err, "existence check failed, treating as absent");
            false
        }
    }
}
