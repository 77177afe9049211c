//! p4sync CLI - workspace view, revision and branch resolution

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod cmd;
mod config;
mod manifest;
mod util;

/// p4sync - decide what a Perforce CI workspace should sync
#[derive(Parser)]
#[command(name = "p4sync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: <config dir>/p4sync/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the client view for the configured depot spec
    View {
        /// Depot spec (overrides config; separate lines with \n)
        #[arg(long)]
        depot: Option<String>,
        /// Client root name (overrides config)
        #[arg(long)]
        client: Option<String>,
    },
    /// Select the revision(s) to sync from a change feed
    Select {
        /// JSON file holding an array of changelists
        #[arg(long)]
        changes: PathBuf,
        /// Poll for new work or resolve a build revision
        #[arg(long, value_enum, default_value = "poll")]
        mode: ModeArg,
        /// Annotate each revision with its branch, probing this file list
        #[arg(long)]
        manifest: Option<PathBuf>,
        #[command(flatten)]
        pin: PinArgs,
    },
    /// Find the branch root of a depot file by its marker file
    Scan {
        /// Affected depot file (e.g. //depot/proj/main/src/a.c)
        path: String,
        /// Text file listing existing depot files, one per line
        #[arg(long)]
        manifest: PathBuf,
        /// Marker file name (overrides config)
        #[arg(long)]
        marker: Option<String>,
        /// Give up after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Print the sync commands for the selected build revision
    Plan {
        /// JSON file holding an array of changelists
        #[arg(long)]
        changes: PathBuf,
        #[command(flatten)]
        pin: PinArgs,
    },
    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path {
        /// Write a default config file if none exists
        #[arg(long)]
        create: bool,
    },
    /// Print an example configuration
    Example,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Poll,
    Build,
}

/// Explicit revision pins (at most one)
#[derive(Args)]
struct PinArgs {
    /// Pin to a label
    #[arg(long, conflicts_with_all = ["change", "review"])]
    label: Option<String>,
    /// Pin to a changelist (newer changes are ignored)
    #[arg(long, conflicts_with = "review")]
    change: Option<u64>,
    /// Unshelve this review on top of --base
    #[arg(long, requires = "base")]
    review: Option<u64>,
    /// Base changelist for --review
    #[arg(long, requires = "review")]
    base: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays scriptable
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::View { depot, client } => cmd::view::run(config_path, depot, client).await,
        Commands::Select { changes, mode, manifest, pin } => {
            let request = util::revision_request(pin.label, pin.change, pin.review, pin.base);
            cmd::select::run(config_path, &changes, mode.into(), request, manifest.as_deref()).await
        }
        Commands::Scan { path, manifest, marker, timeout_secs } => {
            cmd::scan::run(config_path, &path, &manifest, marker, timeout_secs).await
        }
        Commands::Plan { changes, pin } => {
            let request = util::revision_request(pin.label, pin.change, pin.review, pin.base);
            cmd::plan::run(config_path, &changes, request).await
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cmd::config::run_show(config_path).await,
            ConfigCommands::Path { create } => cmd::config::run_path(config_path, create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}

impl From<ModeArg> for selector::Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Poll => selector::Mode::Poll,
            ModeArg::Build => selector::Mode::Build,
        }
    }
}
