//! Tokensmith CLI
//!
//! Builds SCSS variable files and `html[data-theme=..]` blocks from design
//! token sources described in `tokensmith.toml`.
//!
//! - `tokensmith build`: clean, then render every configured file
//! - `tokensmith clean`: remove generated files
//! - `tokensmith watch`: build, then rebuild on source changes
//! - `tokensmith init`: scaffold a config and sample sources

mod build;
mod config;
mod project;
mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{project_root, TokensmithConfig, Verbosity};

/// Design token to SCSS generator
#[derive(Parser, Debug)]
#[command(name = "tokensmith")]
#[command(about = "Build SCSS variables and theme blocks from design tokens")]
#[command(version)]
struct Cli {
    /// Project directory or path to tokensmith.toml
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    /// Log everything, including per-token reference resolution
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clean and build all outputs
    Build,
    /// Remove all generated outputs
    Clean,
    /// Build, then rebuild whenever a source file changes
    Watch,
    /// Create tokensmith.toml and sample token sources
    Init {
        /// Directory to initialize
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn init_tracing(verbosity: Verbosity, verbose: bool) {
    let default = if verbose { "trace" } else { verbosity.filter() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load the project config and install logging at its verbosity
fn load_project(config: &Path, verbose: bool) -> Result<(PathBuf, TokensmithConfig)> {
    let loaded = TokensmithConfig::load_from_dir(config)?;
    init_tracing(loaded.log.verbosity, verbose);
    Ok((project_root(config), loaded))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build => {
            let (root, config) = load_project(&cli.config, cli.verbose)?;
            let written = build::rebuild(&root, &config)?;
            info!(files = written.len(), "build finished");
        }
        Commands::Clean => {
            let (root, config) = load_project(&cli.config, cli.verbose)?;
            let removed = build::clean(&root, &config)?;
            info!(files = removed, "clean finished");
        }
        Commands::Watch => {
            let (root, config) = load_project(&cli.config, cli.verbose)?;
            watch::watch(&root, &config)?;
        }
        Commands::Init { path } => {
            init_tracing(Verbosity::Default, cli.verbose);
            project::create_project(&path)?;
            info!(path = %path.display(), "created tokensmith project");
        }
    }

    Ok(())
}
