//! Print the client view

use crate::config;
use anyhow::{Context, Result};
use depot_core::generate_client_view;
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(config_path: Option<&Path>, depot: Option<String>, client: Option<String>) -> Result<()> {
    // Flags override the file; the file is only read when something is missing
    let (depot_spec, client_root) = match (depot, client) {
        (Some(depot), Some(client)) => (depot, client),
        (depot, client) => {
            let config = config::load(config_path)?;
            (
                depot.unwrap_or(config.workspace.depot_spec),
                client.unwrap_or(config.workspace.client_root),
            )
        }
    };

    // Allow literal "\n" separators from the command line
    let depot_spec = depot_spec.replace("\\n", "\n");

    match generate_client_view(&depot_spec, &client_root).context("Failed to generate client view")? {
        Some(view) => println!("{}", view),
        None => eprintln!("{}", "No depot spec or client root configured".yellow()),
    }

    Ok(())
}
