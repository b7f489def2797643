//! One-shot admin assistant query

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::output::json::JsonAnswer;
use crate::progress::Step;
use crate::workspace::Workspace;
use crate::{Cli, OutputFormat};

pub fn run(scenario_id: &str, question: &str, cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let scenario = ctx.scenario(scenario_id)?;
    let mut ws = Workspace::new(ctx.provider()?, ctx.paywall());
    ws.session.select_scenario(scenario.clone());

    if ctx.format == OutputFormat::Json {
        let answer = ws.ask(question).unwrap_or_default();
        let out = JsonAnswer {
            scenario: scenario.id,
            question: question.to_string(),
            answer,
            simulated: ws.provider().is_simulated(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let step = Step::new("Asking the analyst");
    let answer = ws.ask(question).unwrap_or_default();
    step.finish(&scenario.name);
    println!();
    println!("  {} {}", "Q:".bold(), question);
    println!("  {} {}", "A:".bold().green(), answer);
    Ok(())
}
