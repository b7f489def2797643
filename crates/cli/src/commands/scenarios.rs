//! List the scenario catalog

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::output::{json::JsonScenario, terminal};
use crate::{Cli, OutputFormat};

pub fn run(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;

    if ctx.format == OutputFormat::Json {
        let scenarios: Vec<JsonScenario> = ctx.catalog.iter().map(JsonScenario::from).collect();
        println!("{}", serde_json::to_string_pretty(&scenarios)?);
        return Ok(());
    }

    println!("{}", "  VibeWall — the AI product generator".bold());
    println!("  {}", "Monetization is now a UI decision.".dimmed());
    println!();
    for (i, scenario) in ctx.catalog.iter().enumerate() {
        print!("{}", terminal::format_scenario_card(i + 1, scenario));
        println!();
    }
    println!("  Launch one with {}", "vibewall run <id>".bold());
    Ok(())
}
