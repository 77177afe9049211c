//! Workflow integration tests
//!
//! Each module drives the built binary end to end.

pub mod scan_branch;
pub mod select_revision;
pub mod sync_plan;
pub mod view_generation;
