//! Revision selection
//!
//! Candidates arrive newest first from the depot query service. Selection
//! never treats "nothing to do" as an error, but a failing change source is
//! always reported so a transient outage cannot silently skip a build.

use crate::filter::CompiledFilters;
use depot_core::{Changelist, RevisionSpec};

/// Why a selection is being made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Looking for new work; may widen to one revision per change
    Poll,
    /// Syncing a build workspace; always resolves to one revision
    Build,
}

/// What the caller asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionRequest {
    /// Newest eligible change
    Latest,
    /// Explicit revision. Labels and reviews bypass filtering; a changelist
    /// number caps the candidates considered.
    Pinned(RevisionSpec),
}

/// Outcome of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Sync to this revision
    Single(RevisionSpec),
    /// One revision per surviving change, oldest first
    PerChange(Vec<RevisionSpec>),
    /// Nothing eligible; a normal outcome
    NoChange,
}

impl Selection {
    pub fn is_no_change(&self) -> bool {
        matches!(self, Selection::NoChange)
    }

    /// Revisions in the order they should be built
    pub fn revisions(&self) -> Vec<&RevisionSpec> {
        match self {
            Selection::Single(rev) => vec![rev],
            Selection::PerChange(revs) => revs.iter().collect(),
            Selection::NoChange => Vec::new(),
        }
    }
}

/// Depot query collaborator supplying candidates, newest first
pub trait ChangeSource {
    fn changes(&self) -> anyhow::Result<Vec<Changelist>>;
}

impl<F> ChangeSource for F
where
    F: Fn() -> anyhow::Result<Vec<Changelist>>,
{
    fn changes(&self) -> anyhow::Result<Vec<Changelist>> {
        self()
    }
}

/// Failure to obtain candidates
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("change source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Pick the revision(s) to sync from newest-first `candidates`
pub fn select_revision(
    candidates: &[Changelist],
    filters: &CompiledFilters,
    request: &RevisionRequest,
    mode: Mode,
) -> Selection {
    let ceiling = match request {
        RevisionRequest::Pinned(pin) if pin.is_explicit_pin() => {
            return Selection::Single(pin.clone());
        }
        RevisionRequest::Pinned(RevisionSpec::ChangelistNumber { change }) => Some(*change),
        _ => None,
    };

    let mut survivors = candidates
        .iter()
        .filter(|c| ceiling.map_or(true, |max| c.id <= max))
        .filter(|c| filters.accepts(c));

    let per_change = filters.per_change_only() && !filters.latest_change_only() && mode == Mode::Poll;
    if per_change {
        let mut revisions: Vec<_> = survivors.map(|c| RevisionSpec::change(c.id)).collect();
        if revisions.is_empty() {
            return Selection::NoChange;
        }
        revisions.reverse();
        return Selection::PerChange(revisions);
    }

    match survivors.next() {
        Some(newest) => Selection::Single(RevisionSpec::change(newest.id)),
        None => Selection::NoChange,
    }
}

/// Query `source` and select from its candidates
///
/// Explicit label/review pins never touch the source.
pub fn select_from_source(
    source: &dyn ChangeSource,
    filters: &CompiledFilters,
    request: &RevisionRequest,
    mode: Mode,
) -> crate::Result<Selection> {
    if let RevisionRequest::Pinned(pin) = request {
        if pin.is_explicit_pin() {
            return Ok(Selection::Single(pin.clone()));
        }
    }

    let candidates = source.changes().map_err(|err| SelectError::Source(err.into()))?;
    tracing::debug!(candidates = candidates.len(), ?mode, "selecting revision");
    Ok(select_revision(&candidates, filters, request, mode))
}
