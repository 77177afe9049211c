//! Changelist filtering and revision selection
//!
//! This crate provides:
//! - Filter sets (user, path prefix, pattern allow-list, minimum change)
//! - Pattern compilation that skips malformed expressions with a warning
//! - Revision selection for polling and builds
//! - The `ChangeSource` seam to the depot query service

pub mod filter;
pub mod select;

// Re-exports
pub use filter::{CompiledFilters, Filter, FilterSet, PatternWarning};
pub use select::{
    select_from_source, select_revision, ChangeSource, Mode, RevisionRequest, SelectError,
    Selection,
};

/// Result type for selection against a live change source
pub type Result<T> = std::result::Result<T, SelectError>;
