//! jasper CLI — inspect FPGA platform descriptions.

mod commands;

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use jasper_platform::{PlatformRoot, ROOT_ENV_VAR};

#[derive(Parser)]
#[command(name = "jasper", version, about = "Inspect jasper FPGA platform descriptions")]
struct Cli {
    /// Library checkout root (default: $MLIB_DEVEL_PATH)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query platform definitions
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },
}

#[derive(Subcommand)]
enum PlatformAction {
    /// List available platforms
    List,
    /// Show details of a platform
    Describe {
        /// Platform name (case-insensitive)
        name: String,
        /// Output format (text, json, toml)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show the physical pins behind an abstract pin name
    Pins {
        /// Platform name (case-insensitive)
        name: String,
        /// Abstract pin name (e.g., zdok0)
        bank: String,
        /// Pin index within the bank; repeatable (default: 0)
        #[arg(long = "index")]
        indices: Vec<usize>,
        /// Print every pin of the bank
        #[arg(long, conflicts_with = "indices")]
        all: bool,
    },
    /// Check a platform definition for consistency
    Validate {
        /// Platform name (case-insensitive)
        name: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let root = resolve_root(cli.root)?;
    tracing::debug!(root = %root.path().display(), "using platform root");

    match cli.command {
        Commands::Platform { action } => match action {
            PlatformAction::List => commands::platform::list(&root),
            PlatformAction::Describe { name, format } => {
                commands::platform::describe(&root, &name, format.as_deref())
            }
            PlatformAction::Pins {
                name,
                bank,
                indices,
                all,
            } => commands::platform::pins(&root, &name, &bank, &indices, all),
            PlatformAction::Validate { name } => commands::platform::validate(&root, &name),
        },
    }
}

/// `--root` wins over the environment.
fn resolve_root(explicit: Option<PathBuf>) -> anyhow::Result<PlatformRoot> {
    match explicit {
        Some(path) => Ok(PlatformRoot::new(path)),
        None => PlatformRoot::from_env()
            .with_context(|| format!("pass --root or set {ROOT_ENV_VAR}")),
    }
}
