//! Switcher command line.
//!
//! Replays scripted sessions, prints strip layouts and manages the config
//! file. Results go to stdout as JSON; logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use switcher_cli::{replay, report};
use switcher_core::config::{Config, Directories};
use switcher_types::Rect;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Switcher overlay tools
#[derive(Parser, Debug)]
#[command(name = "switcher")]
#[command(version, about, long_about = None)]
#[command(after_help = "\
Examples:
  switcher replay demos/cycle-back.json   Replay a scripted session
  switcher layout -n 12 --width 2560      Show icon strip placement
  switcher config init                    Write the default config
  switcher config check                   Validate the config file
")]
struct Cli {
    /// Config file (defaults to ~/.config/switcher/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a scripted session and print the outcome
    Replay {
        script: PathBuf,

        /// Pretty-print the JSON outcome
        #[arg(long)]
        pretty: bool,
    },

    /// Print where the icon strip and its items would be placed
    Layout {
        /// Number of items
        #[arg(short = 'n', long, default_value_t = 5)]
        items: usize,

        #[arg(long, default_value_t = 1920)]
        width: i32,

        #[arg(long, default_value_t = 1080)]
        height: i32,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the config file path
    Path,

    /// Write the default config
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Load and validate the config file
    Check,
}

/// Set up logging to stderr, plus a timestamped file in debug builds.
fn setup_logging() {
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_env("SWITCHER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("switcher={default_level}")));

    if cfg!(debug_assertions) {
        let temp_dir = std::env::temp_dir();
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_filename = format!("switcher-{timestamp}.log");
        let log_path = temp_dir.join(&log_filename);

        #[cfg(unix)]
        {
            let symlink_path = temp_dir.join("switcher.log");
            let _ = std::fs::remove_file(&symlink_path);
            let _ = std::os::unix::fs::symlink(&log_path, &symlink_path);
        }

        let file_appender = tracing_appender::rolling::never(&temp_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        std::mem::forget(guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true);

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .with(filter)
            .init();

        eprintln!("Logging to: {} (and stderr)", log_path.display());
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(filter)
            .init();
    }
}

fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(Directories::new()?.config_file),
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Config::default().save(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging();

    let path = config_path(cli.config)?;

    match cli.command {
        Commands::Replay { script, pretty } => {
            let config = load_config(&path)?;
            let script = replay::Script::load(&script)
                .with_context(|| format!("Failed to load script {}", script.display()))?;
            info!("replaying {} steps", script.steps.len());
            let outcome = replay::run(script, config).await?;
            print_json(&outcome, pretty)?;
        }
        Commands::Layout {
            items,
            width,
            height,
        } => {
            let config = load_config(&path)?;
            let screen = Rect::new(0, 0, width, height);
            print_json(&report::icon_layout(&config, screen, items), true)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => println!("{}", path.display()),
            ConfigAction::Init { force } => init_config(&path, force)?,
            ConfigAction::Check => {
                load_config(&path)?;
                println!("{} is valid", path.display());
            }
        },
    }

    Ok(())
}
