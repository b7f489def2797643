//! Batch mode: meter a list of items and run the allowed ones concurrently

use anyhow::Result;
use colored::Colorize;
use vibewall_core::entitlement::usage_meter;

use super::Context;
use crate::output::{json, terminal};
use crate::progress::Step;
use crate::workspace::{ItemOutcome, Workspace};
use crate::{Cli, OutputFormat};

pub fn run(scenario_id: &str, items: &[String], pro: bool, cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let scenario = ctx.scenario(scenario_id)?;
    let mut ws = Workspace::new(ctx.provider()?, ctx.paywall());
    let terminal_out = ctx.format == OutputFormat::Terminal;

    let step = terminal_out.then(|| Step::new(format!("Launching {}", scenario.name)));
    ws.launch(scenario.clone());
    if let Some(step) = &step {
        step.finish(&format!("{} item(s) available", ws.items().len()));
    }

    if pro {
        ws.session.upgrade();
    }

    let targets: Vec<String> = if items.is_empty() {
        ws.items().to_vec()
    } else {
        items.to_vec()
    };

    let step = terminal_out.then(|| Step::new(format!("Running {} request(s)", targets.len())));
    let outcomes = ws.act_many(&targets);
    let completed = outcomes
        .iter()
        .filter(|o| matches!(o, ItemOutcome::Completed { .. }))
        .count();
    if let Some(step) = &step {
        step.finish(&format!("{} completed", completed));
    }

    if !terminal_out {
        let out = json::run_output(
            &scenario,
            ws.provider().is_simulated(),
            ws.session.state(),
            &outcomes,
        );
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    for outcome in &outcomes {
        match outcome {
            ItemOutcome::Completed {
                result,
                overage_charge,
            } => {
                print!("{}", terminal::format_report(result, scenario.theme));
                if let Some(charge) = overage_charge {
                    println!("  {} Overage billed: ${:.2}", "\u{26a1}".yellow(), charge);
                }
                println!();
            }
            ItemOutcome::Denied(item) => {
                println!("  {} {} — free limit reached", "\u{1f512}".red(), item.bold())
            }
            ItemOutcome::Busy(item) => {
                println!("  {} {} — duplicate request skipped", "\u{21bb}".dimmed(), item)
            }
            ItemOutcome::Discarded(item) => println!("  {} discarded", item.dimmed()),
            ItemOutcome::NoScenario => {}
        }
    }

    let state = ws.session.state();
    let meter = usage_meter(state, &scenario);
    println!(
        "{}",
        terminal::format_usage_header(&scenario, &meter, state.tier, state.wallet_balance)
    );
    if ws.paywall.is_open() {
        println!();
        print!("{}", terminal::format_paywall(&ws.paywall, &scenario));
    }
    Ok(())
}
