//! Depot paths, client views and sync plans
//!
//! This crate provides:
//! - `DepotPath` parsing and segment utilities (shared with the branch scanner)
//! - Client view maps with include/exclude polarity
//! - Client view generation from a depot spec and a client root
//! - Revision specs and changelist metadata
//! - Populate/publish strategies and the resulting sync plan

pub mod error;
pub mod path;
pub mod plan;
pub mod resolver;
pub mod revision;
pub mod strategy;
pub mod view;

// Re-exports
pub use error::{ConfigError, PathError};
pub use path::DepotPath;
pub use plan::SyncPlan;
pub use resolver::generate_client_view;
pub use revision::{Changelist, RevisionSpec};
pub use strategy::{Populate, PopulateOptions, Publish};
pub use view::{Polarity, ViewMap, ViewMapEntry};

/// Result type for configuration-level operations
pub type Result<T> = std::result::Result<T, ConfigError>;
