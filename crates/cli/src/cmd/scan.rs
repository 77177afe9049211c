//! Find the branch root of a depot file

use crate::config;
use crate::manifest::Manifest;
use anyhow::{Context, Result};
use depot_core::DepotPath;
use owo_colors::OwoColorize;
use scanner::{scan_async, CancelToken};
use std::path::Path;
use std::time::Duration;

pub async fn run(
    config_path: Option<&Path>,
    path: &str,
    manifest: &Path,
    marker: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let marker = match marker {
        Some(marker) => marker,
        None => config::load(config_path)?.workspace.marker_file,
    };

    let affected = DepotPath::parse(path).with_context(|| format!("Invalid depot path '{}'", path))?;
    let manifest = Manifest::load(manifest)?;
    tracing::debug!(files = manifest.len(), marker = %marker, "scanning for branch root");

    let token = CancelToken::new();
    if let Some(secs) = timeout_secs {
        let timer = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            timer.cancel();
        });
    }

    let result = scan_async(&affected, &marker, &manifest, &token)
        .await
        .context("Branch scan did not finish")?;

    match (&result.branch, &result.project_root) {
        (Some(branch), root) => {
            println!("branch:  {}", branch.green());
            match root {
                Some(root) => println!("project: {}", root.to_string().cyan()),
                None => println!("project: {}", "(depot root)".dimmed()),
            }
        }
        (None, _) => println!("{}", format!("no {} found above {}", marker, affected).dimmed()),
    }

    Ok(())
}
