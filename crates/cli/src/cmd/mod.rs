//! CLI command implementations

pub mod config;
pub mod plan;
pub mod scan;
pub mod select;
pub mod view;
