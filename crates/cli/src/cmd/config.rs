//! Configuration commands

use crate::config;
use anyhow::Result;
use depot_core::generate_client_view;
use owo_colors::OwoColorize;
use std::path::Path;

/// Show the effective configuration and the view it produces
pub async fn run_show(config_path: Option<&Path>) -> Result<()> {
    let path = config::resolve_path(config_path)?;
    let config = config::load(config_path)?;

    println!("{}", "Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), path.display().dimmed());

    println!("{}", "[workspace]".yellow());
    println!("  {} = {}", "client_root".cyan(), config.workspace.client_root);
    println!("  {} = {}", "marker_file".cyan(), config.workspace.marker_file);

    match generate_client_view(&config.workspace.depot_spec, &config.workspace.client_root)? {
        Some(view) => {
            println!("  {}:", "view".cyan());
            for line in view.to_string().lines() {
                println!("    {}", line);
            }
        }
        None => println!("  {} = {}", "view".cyan(), "(none)".dimmed()),
    }

    println!("\n{}", "[filters]".yellow());
    println!("  {} = {}", "latest_change_only".cyan(), config.filters.latest_change_only);
    println!("  {} = {}", "per_change_only".cyan(), config.filters.per_change_only);
    println!("  {} = {}", "rules".cyan(), config.filters.rules.len());

    println!("\n{}", "[populate]".yellow());
    println!("  {:?}", config.populate);

    if let Some(publish) = &config.publish {
        println!("\n{}", "[publish]".yellow());
        println!("  {:?}", publish);
    }

    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(config_path: Option<&Path>, create: bool) -> Result<()> {
    let path = config::resolve_path(config_path)?;

    if create && config::init_if_missing(&path)? {
        println!("{} Created config file at: {}", "✓".green(), path.display());
    } else if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{}", path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    println!("{}", config::example_config());
    Ok(())
}
