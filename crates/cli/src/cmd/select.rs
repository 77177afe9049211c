//! Select the revision(s) to sync

use crate::manifest::Manifest;
use crate::{config, util};
use anyhow::{Context, Result};
use depot_core::{Changelist, RevisionSpec};
use owo_colors::OwoColorize;
use selector::{select_from_source, Mode, RevisionRequest, Selection};
use std::path::Path;

pub async fn run(
    config_path: Option<&Path>,
    changes: &Path,
    mode: Mode,
    request: RevisionRequest,
    manifest: Option<&Path>,
) -> Result<()> {
    let config = config::load(config_path)?;
    let filters = util::compile_filters(&config.filters);

    let source = || util::load_changes(changes);
    let selection = select_from_source(&source, &filters, &request, mode)
        .context("Failed to select revision")?;

    let revisions = match selection {
        Selection::Single(rev) => vec![rev],
        Selection::PerChange(revs) => revs,
        Selection::NoChange => {
            println!("{}", "no change".dimmed());
            return Ok(());
        }
    };

    // Branch annotation needs the change feed and a manifest of depot files;
    // pinned labels and reviews have no changelist to scan
    let scannable = revisions
        .iter()
        .any(|rev| matches!(rev, RevisionSpec::ChangelistNumber { .. }));
    let branches = match manifest {
        Some(path) if scannable => Some((util::load_changes(changes)?, Manifest::load(path)?)),
        _ => None,
    };

    for rev in &revisions {
        match &branches {
            Some((feed, manifest)) => {
                let branch = branch_of(rev, feed, manifest, &config.workspace.marker_file);
                match branch {
                    Some(branch) => println!("{} {}", rev, branch.cyan()),
                    None => println!("{} {}", rev, "-".dimmed()),
                }
            }
            None => println!("{}", rev),
        }
    }

    Ok(())
}

/// Branch of a selected changelist, found by scanning its first file
fn branch_of(rev: &RevisionSpec, feed: &[Changelist], manifest: &Manifest, marker: &str) -> Option<String> {
    let RevisionSpec::ChangelistNumber { change } = rev else {
        return None;
    };
    let changelist = feed.iter().find(|c| c.id == *change)?;
    scanner::scan_changelist(changelist, marker, manifest).branch
}
