//! VibeWall CLI - AI product simulator with usage-based paywalls

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vibewall_cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Some(Commands::Init { ref path }) => {
            commands::init::run(path.as_deref())?;
        }
        Some(Commands::Scenarios) => {
            commands::scenarios::run(&cli)?;
        }
        Some(Commands::Run { ref scenario }) => {
            commands::run::run(scenario.as_deref(), &cli)?;
        }
        Some(Commands::Analyze {
            ref scenario,
            ref items,
            pro,
        }) => {
            commands::analyze::run(scenario, items, pro, &cli)?;
        }
        Some(Commands::Ask {
            ref scenario,
            ref question,
        }) => {
            commands::ask::run(scenario, &question.join(" "), &cli)?;
        }
        None => {
            // Default command is the scenario list
            commands::scenarios::run(&cli)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "vibewall=debug,vibewall_core=debug,vibewall_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}
