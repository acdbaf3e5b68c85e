//! Knot Runtime
//!
//! The entry point for the recursion demonstrations. Handles CLI args,
//! configuration, and dispatching the demo runs. Computed values go to
//! stdout; diagnostics and failures go to stderr.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use knot::config;
use knot::demo;
use knot::types::{default_config, DemoConfig, LogLevel, TemplateKind};

const VERSION: &str = "0.1.0";

/// Knot -- Anonymous Recursion Demonstrations
#[derive(Parser, Debug)]
#[command(
    name = "knot",
    version = VERSION,
    about = "Anonymous recursion via a fixed-point combinator, with two contrasts"
)]
struct Cli {
    /// Run the fixed-point combinator demonstration
    #[arg(long)]
    fixpoint: bool,

    /// Run the global-bindings demonstration (ends in a lookup failure)
    #[arg(long)]
    lookup: bool,

    /// Compute the sequence, then write a callable snapshot
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    save: Option<Option<PathBuf>>,

    /// Reconstruct a callable from a snapshot and run it
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    load: Option<Option<PathBuf>>,

    /// With --save: describe the literal-expression template instead
    /// of the named one
    #[arg(long)]
    literal: bool,

    /// Write the current configuration to ~/.knot/knot.json
    #[arg(long)]
    init_config: bool,
}

// ---- Helpers ----------------------------------------------------------------

fn init_tracing(level: LogLevel) {
    let level = match level {
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Error => tracing::Level::ERROR,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// An explicit CLI path wins; otherwise the configured snapshot path,
/// tilde-resolved.
fn snapshot_path(cli_path: Option<PathBuf>, config: &DemoConfig) -> PathBuf {
    cli_path.unwrap_or_else(|| PathBuf::from(config::resolve_path(&config.snapshot_path)))
}

fn fail(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "error:".red().bold(), err);
    process::exit(1);
}

// ---- Entry Point -----------------------------------------------------------

fn main() {
    let cli = Cli::parse();
    let config = config::load_config().unwrap_or_else(default_config);
    init_tracing(config.log_level);

    if cli.init_config {
        if let Err(e) = config::save_config(&config) {
            fail(e);
        }
        println!("Wrote {}", config::get_config_path().display());
        return;
    }

    if cli.fixpoint {
        demo::fixpoint_demo(config.fixpoint_upper);
        return;
    }

    if cli.lookup {
        if let Err(e) =
            demo::lookup_demo(config.lookup_upper).context("global-bindings demonstration failed")
        {
            fail(e);
        }
        return;
    }

    if let Some(path) = cli.save {
        let path = snapshot_path(path, &config);
        let template = if cli.literal {
            TemplateKind::Literal
        } else {
            TemplateKind::Named
        };
        if let Err(e) = demo::save_demo(&path, template, config.snapshot_upper)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))
        {
            fail(e);
        }
        return;
    }

    if let Some(path) = cli.load {
        let path = snapshot_path(path, &config);
        if let Err(e) = demo::load_demo(&path, config.snapshot_upper)
            .with_context(|| format!("failed to run snapshot from {}", path.display()))
        {
            fail(e);
        }
        return;
    }

    // Default: show usage hints.
    println!("Run \"knot --help\" for usage information.");
    println!("Run \"knot --fixpoint\" to watch a function recurse without its name.");
}
