//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use depot_core::{Changelist, RevisionSpec};
use owo_colors::OwoColorize;
use selector::{CompiledFilters, FilterSet, RevisionRequest};
use std::path::Path;

/// Build the revision request from the pin flags (clap keeps them exclusive)
pub fn revision_request(
    label: Option<String>,
    change: Option<u64>,
    review: Option<u64>,
    base: Option<u64>,
) -> RevisionRequest {
    if let Some(name) = label {
        return RevisionRequest::Pinned(RevisionSpec::label(name));
    }
    if let Some(change) = change {
        return RevisionRequest::Pinned(RevisionSpec::change(change));
    }
    match (review, base) {
        (Some(review), Some(base)) => RevisionRequest::Pinned(RevisionSpec::review(review, base)),
        _ => RevisionRequest::Latest,
    }
}

/// Read a JSON change feed, returned newest first
pub fn load_changes(path: &Path) -> Result<Vec<Changelist>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read change feed {}", path.display()))?;
    let mut changes: Vec<Changelist> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse change feed {}", path.display()))?;

    changes.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(changes)
}

/// Compile filters, reporting skipped patterns on stderr
pub fn compile_filters(set: &FilterSet) -> CompiledFilters {
    let (compiled, warnings) = set.compile();
    for warning in warnings {
        eprintln!(
            "{} skipping filter pattern '{}': {}",
            "warning:".yellow(),
            warning.pattern,
            warning.message.lines().last().unwrap_or_default()
        );
    }
    compiled
}

/// Render an argument list as a shell-style `p4` command line
pub fn format_command(args: &[String]) -> String {
    let mut line = String::from("p4");
    for arg in args {
        line.push(' ');
        if arg.contains(' ') {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}
