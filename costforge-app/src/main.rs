//! Costforge CLI
//!
//! Usage:
//!   costforge init project.yaml        Write a project from the defaults
//!   costforge -p project.yaml summary  Annual cost summary
//!   costforge finance --scenario pessimistic
//!   costforge report --out data/runs  CSV tables and summary.md

mod cli;
mod config;
mod workflow;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let project = cli.project;
    let scenario = cli.scenario;
    let load = || -> Result<_> {
        let data = config::load_project(&project)?;
        config::select_scenario(data, scenario.as_deref())
    };

    match cli.command {
        Commands::Summary { rows } => workflow::run_summary(&load()?, rows),
        Commands::Ramp => workflow::run_ramp(&load()?),
        Commands::Finance => workflow::run_finance(&load()?),
        Commands::Scenarios => workflow::run_scenarios(&load()?),
        Commands::Report { out } => {
            let dir = workflow::write_report(&project, &load()?, &out)?;
            println!("\nReport complete. Results are in '{}'", dir.display());
        }
        Commands::Init {
            path,
            name,
            preset,
            currency,
            price,
            force,
        } => {
            let opts = workflow::InitOptions {
                name: &name,
                preset: &preset,
                currency: currency.as_deref(),
                price,
                force,
            };
            workflow::run_init(&path, &opts)?;
            println!("Project '{}' written to {:?}", name, path);
        }
        Commands::Stage { name } => workflow::run_stage(name.as_deref()),
    }

    Ok(())
}
