//! Application entry point for the forest growth viewer.
//!
//! This binary parses the command line, installs logging, loads the species
//! catalog and then either runs a few periods headless or hands the forest
//! to [`Viewer`] inside an eframe window.

mod viewer;

use anyhow::Context;
use clap::Parser;
use forest_core::{Forest, SimConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viewer::Viewer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with the initial environment and species catalog
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the built-in configuration as TOML and exit
    #[arg(long)]
    export_catalog: bool,

    /// Advance this many periods without a window and print the reports
    #[arg(long, value_name = "PERIODS")]
    headless: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if args.export_catalog {
        print!("{}", SimConfig::default().to_toml_string()?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    let forest = config.build_forest()?;

    if let Some(periods) = args.headless {
        return run_headless(forest, &config, periods);
    }

    let options = eframe::NativeOptions::default();
    let environment = config.environment;
    eframe::run_native(
        "Forest Growth Simulation",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(forest, environment)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

/// Advances `periods` times with the configured environment and prints
/// every report to stdout.
fn run_headless(mut forest: Forest, config: &SimConfig, periods: usize) -> anyhow::Result<()> {
    for _ in 0..periods {
        let report = forest.advance_all(&config.environment)?;
        println!("Period {}", report.period);
        print!("{report}");
    }
    Ok(())
}
