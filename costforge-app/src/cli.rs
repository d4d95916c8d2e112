//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Costforge - standard costing and financial projection for process plants
#[derive(Parser)]
#[command(name = "costforge")]
#[command(about = "Annual cost rollups, ramp-up and NPV/IRR for a process project", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project file (YAML or JSON)
    #[arg(short, long, default_value = "data/projects/generic_process.yaml", global = true)]
    pub project: PathBuf,

    /// Evaluate under this scenario instead of the project's active one
    #[arg(short, long, global = true)]
    pub scenario: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the cost summary: categories, overhead, contingency, tax, risk
    Summary {
        /// Also list every itemized cost row
        #[arg(long)]
        rows: bool,
    },

    /// Print the first-year monthly ramp-up allocation
    Ramp,

    /// Print the year-by-year cash-flow projection with NPV, IRR and payback
    Finance,

    /// Compare every defined scenario side by side
    Scenarios,

    /// Write CSV tables and a markdown summary to a timestamped directory
    Report {
        /// Parent directory for the run folder
        #[arg(short, long, default_value = "data/runs")]
        out: PathBuf,
    },

    /// Write a new project file from the defaults
    Init {
        /// Destination (.yaml, .yml or .json)
        path: PathBuf,

        /// Project name
        #[arg(long, default_value = "New Project")]
        name: String,

        /// Process preset to start from
        #[arg(long, default_value = "Generic Process")]
        preset: String,

        /// Currency label
        #[arg(long)]
        currency: Option<String>,

        /// Selling price per tonne (0 costs the project only)
        #[arg(long)]
        price: Option<f64>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show accuracy bands and default contingency per project stage
    Stage {
        /// Stage name; all stages when omitted
        name: Option<String>,
    },
}
