//! Navkit CLI
//!
//! - `navkit init` writes a default `navkit.toml`
//! - `navkit dock` simulates dock magnification for a pointer path
//! - `navkit drawer` simulates a scripted drawer open/close sequence
//!
//! Simulations print JSON views to stdout; logs go to stderr and follow
//! `RUST_LOG` (default `info`).

mod config;
mod simulate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::NavkitConfig;

/// Headless tools for navkit navigation widgets
#[derive(Parser, Debug)]
#[command(name = "navkit")]
#[command(about = "Scaffold and simulate navkit dock and drawer widgets")]
#[command(version)]
struct Cli {
    /// Configuration file or directory containing navkit.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default navkit.toml
    Init {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Simulate the magnifying dock
    Dock {
        /// Pointer x positions, or `leave`, comma separated
        #[arg(long, default_value = "leave")]
        pointer: String,

        /// Number of dock items
        #[arg(long, default_value_t = 5)]
        items: usize,

        /// Frames to hold each pointer step
        #[arg(long, default_value_t = 60)]
        frames: usize,
    },

    /// Simulate the staggered drawer
    Drawer {
        /// Requests as `open@<ms>` / `close@<ms>`, comma separated
        #[arg(long, default_value = "open@0")]
        script: String,

        /// Simulated time in milliseconds
        #[arg(long, default_value_t = 2000.0)]
        duration_ms: f32,

        /// Print every frame instead of only the last
        #[arg(long)]
        every_frame: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init { path, force } => {
            let written = config::write_default(&path, force)?;
            tracing::info!("Wrote {}", written.display());
        }
        Command::Dock {
            pointer,
            items,
            frames,
        } => {
            let config = NavkitConfig::load_or_default(cli.config.as_deref())?;
            let steps = simulate::parse_pointer(&pointer)?;
            let snapshots = simulate::run_dock(&config, &steps, items, frames)?;
            print_json(&snapshots)?;
        }
        Command::Drawer {
            script,
            duration_ms,
            every_frame,
        } => {
            let config = NavkitConfig::load_or_default(cli.config.as_deref())?;
            let script = simulate::parse_script(&script)?;
            let snapshots = simulate::run_drawer(
                &config,
                &script,
                simulate::sample_entries(),
                duration_ms,
                every_frame,
            )?;
            print_json(&snapshots)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
