//! VibeWall CLI library — exposed for integration tests

pub mod ai;
pub mod commands;
pub mod identity;
pub mod output;
pub mod progress;
pub mod workspace;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use workspace::Workspace;

#[derive(Parser)]
#[command(name = "vibewall")]
#[command(about = "Launch AI products with metered paywalls from your terminal", long_about = None)]
#[command(version = vibewall_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Use canned content even when an API key is configured
    #[arg(long, global = true)]
    pub simulate: bool,

    /// Log provider calls and metering decisions
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize .vibewall.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },

    /// List available scenarios and their pricing
    Scenarios,

    /// Launch a scenario workspace (interactive)
    Run {
        /// Scenario id (default: [general].default_scenario, else the first)
        scenario: Option<String>,
    },

    /// Run metered actions on several items at once
    Analyze {
        /// Scenario id
        scenario: String,

        /// Item names to act on (default: every listed item)
        items: Vec<String>,

        /// Upgrade to the Pro plan before running
        #[arg(long)]
        pro: bool,
    },

    /// Ask the admin assistant a question about a fresh account
    Ask {
        /// Scenario id
        scenario: String,

        /// Question for the assistant
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    pub fn from_config(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Terminal,
        }
    }
}
