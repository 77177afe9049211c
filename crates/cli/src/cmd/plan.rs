//! Print the sync commands for a build

use crate::{config, util};
use anyhow::{Context, Result};
use depot_core::{generate_client_view, SyncPlan};
use owo_colors::OwoColorize;
use selector::{select_from_source, Mode, RevisionRequest, Selection};
use std::path::Path;

pub async fn run(config_path: Option<&Path>, changes: &Path, request: RevisionRequest) -> Result<()> {
    let config = config::load(config_path)?;

    let view = generate_client_view(&config.workspace.depot_spec, &config.workspace.client_root)
        .context("Failed to generate client view")?
        .context("No depot spec or client root configured")?;

    let filters = util::compile_filters(&config.filters);
    let source = || util::load_changes(changes);
    let selection = select_from_source(&source, &filters, &request, Mode::Build)
        .context("Failed to select revision")?;

    let revision = match selection {
        Selection::Single(rev) => rev,
        Selection::PerChange(mut revs) => revs.pop().context("Empty per-change selection")?,
        Selection::NoChange => {
            println!("{}", "no change".dimmed());
            return Ok(());
        }
    };

    let plan = SyncPlan::new(view, revision, config.populate.clone()).context("Invalid sync plan")?;

    println!("{}", "View:".bold());
    for line in plan.view.client_spec_view().lines() {
        println!("  {}", line);
    }
    println!("{} {}", "Revision:".bold(), plan.revision);
    println!("{}", "Commands:".bold());
    for args in plan.commands() {
        println!("  {}", util::format_command(&args));
    }

    if let Some(publish) = &config.publish {
        println!("{}", "Publish:".bold());
        if let Some(args) = publish.pre_publish_args(&plan.client_path()) {
            println!("  {}", util::format_command(&args));
        }
        println!("  {}", util::format_command(&publish.publish_args()));
        if let Some(args) = publish.post_publish_args(&plan.client_path()) {
            println!("  {}", util::format_command(&args));
        }
    }

    Ok(())
}
