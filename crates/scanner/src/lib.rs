//! Branch root discovery for changelists
//!
//! This crate provides:
//! - Marker-file based branch scanning, deepest ancestor first
//! - `ExistsCheck` / `AsyncExistsCheck` seams to the depot connection
//! - Cooperative cancellation for long scans over a slow connection

pub mod cancel;
pub mod scan;

// Re-exports
pub use cancel::CancelToken;
pub use scan::{
    scan, scan_async, scan_changelist, scan_with_cancel, AsyncExistsCheck, BranchScanResult,
    ExistsCheck, ScanError,
};

/// Result type for cancellable scans
pub type Result<T> = std::result::Result<T, ScanError>;
