//! Interactive workspace: pick items, run metered actions, hit the paywall

use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use vibewall_core::entitlement::usage_meter;
use vibewall_core::{AdminSnapshot, PaywallStep, ScenarioConfig};

use super::{CommandError, Context};
use crate::output::terminal;
use crate::progress::{self, Step};
use crate::workspace::{ItemOutcome, Workspace};
use crate::{identity, Cli};

const LOADER_PHASE_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Items,
    Do(String),
    All,
    History,
    Status,
    Upgrade,
    Checkout,
    Back,
    Pay,
    Simulate,
    Close,
    Admin,
    Ask(String),
    Switch(String),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };
    match (head.to_ascii_lowercase().as_str(), rest) {
        ("", _) => ReplCommand::Empty,
        ("items" | "ls", _) => ReplCommand::Items,
        ("do" | "run", r) if !r.is_empty() => ReplCommand::Do(r.to_string()),
        ("all", _) => ReplCommand::All,
        ("history" | "reports", _) => ReplCommand::History,
        ("status", _) => ReplCommand::Status,
        ("upgrade" | "paywall", _) => ReplCommand::Upgrade,
        ("checkout", _) => ReplCommand::Checkout,
        ("back", _) => ReplCommand::Back,
        ("pay", _) => ReplCommand::Pay,
        ("simulate", _) => ReplCommand::Simulate,
        ("close", _) => ReplCommand::Close,
        ("admin", _) => ReplCommand::Admin,
        ("ask", r) if !r.is_empty() => ReplCommand::Ask(r.to_string()),
        ("switch", r) if !r.is_empty() => ReplCommand::Switch(r.to_string()),
        ("help" | "?", _) => ReplCommand::Help,
        ("quit" | "exit" | "q", _) => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

pub fn run(scenario_id: Option<&str>, cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let id = scenario_id
        .map(str::to_string)
        .or_else(|| ctx.config.general.default_scenario.clone())
        .or_else(|| ctx.catalog.iter().next().map(|s| s.id.clone()))
        .ok_or(CommandError::EmptyCatalog)?;
    let scenario = ctx.scenario(&id)?;

    let mut ws = Workspace::new(ctx.provider()?, ctx.paywall());
    let user_id = identity::admin_user_id();
    launch(&mut ws, scenario);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", "vibewall>".bold());
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;

        match parse_command(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::Help => print_help(),
            ReplCommand::Items => print_items(&ws),
            ReplCommand::Status => print_header(&ws),
            ReplCommand::Do(arg) => match ws.resolve_item(&arg) {
                Some(item) => {
                    let step = Step::new(format!("{} {}", action_name(&ws), item));
                    let outcome = ws.act(&item);
                    step.finish(&outcome_summary(&outcome));
                    print_outcome(&ws, &outcome);
                }
                None => println!("  No such item '{}'. Try {}.", arg, "items".bold()),
            },
            ReplCommand::All => {
                let pending: Vec<String> = ws
                    .items()
                    .iter()
                    .filter(|i| !ws.session.has_result(i))
                    .cloned()
                    .collect();
                if pending.is_empty() {
                    println!("  {}", "Every item has a report already.".dimmed());
                    continue;
                }
                let step = Step::new(format!("Running {} request(s)", pending.len()));
                let outcomes = ws.act_many(&pending);
                step.finish(&format!("{} outcome(s)", outcomes.len()));
                for outcome in &outcomes {
                    print_outcome(&ws, outcome);
                }
            }
            ReplCommand::History => print_history(&ws),
            ReplCommand::Upgrade => {
                ws.paywall.open();
                print_paywall(&ws);
            }
            ReplCommand::Checkout => {
                if ws.paywall.proceed_to_checkout() {
                    print_paywall(&ws);
                } else {
                    println!("  Open the paywall first with {}.", "upgrade".bold());
                }
            }
            ReplCommand::Back => {
                if ws.paywall.back_to_plans() {
                    print_paywall(&ws);
                }
            }
            ReplCommand::Pay => redirect_to_payment(&mut ws),
            ReplCommand::Simulate => {
                if ws.paywall.step() == PaywallStep::Closed {
                    ws.paywall.open();
                }
                let step = Step::new("Processing payment");
                std::thread::sleep(Duration::from_millis(1000));
                if ws.paywall.simulate_success(&mut ws.session) {
                    step.finish("upgraded to Pro");
                } else {
                    step.skip("No active scenario to upgrade");
                }
                print_header(&ws);
            }
            ReplCommand::Close => ws.paywall.close(),
            ReplCommand::Admin => {
                if let Some(scenario) = ws.session.scenario() {
                    let snapshot = AdminSnapshot::from_state(ws.session.state(), scenario);
                    print!("{}", terminal::format_admin(&snapshot, scenario, &user_id));
                }
            }
            ReplCommand::Ask(question) => {
                let step = Step::new("Asking the analyst");
                let answer = ws.ask(&question).unwrap_or_default();
                step.finish("answered");
                println!("  {}", answer);
            }
            ReplCommand::Switch(id) => match ctx.scenario(&id) {
                Ok(scenario) => launch(&mut ws, scenario),
                Err(e) => println!("  {}", e),
            },
            ReplCommand::Unknown(text) => {
                println!("  Unknown command '{}'. Type {} for a list.", text, "help".bold())
            }
        }
    }
    Ok(())
}

fn launch(ws: &mut Workspace, scenario: ScenarioConfig) {
    progress::run_loader(&scenario.name, LOADER_PHASE_DELAY);
    let step = Step::new(format!("Loading {}s", scenario.item_name.to_lowercase()));
    if ws.provider().is_simulated() {
        step.warn("no API key found, running in simulation mode");
    }
    let count = ws.launch(scenario).len();
    if count == 0 {
        step.skip("No items returned");
    } else {
        step.finish(&format!("{} item(s)", count));
    }
    if let Some(text) = ws.briefing() {
        println!("\n  {}\n", text.dimmed());
    }
    print_header(ws);
    print_items(ws);
}

fn action_name(ws: &Workspace) -> String {
    ws.session
        .scenario()
        .map(|s| s.action_name.clone())
        .unwrap_or_default()
}

fn outcome_summary(outcome: &ItemOutcome) -> String {
    match outcome {
        ItemOutcome::Completed { result, .. } => format!("score {}", result.report_data.score),
        ItemOutcome::Denied(_) => "limit reached".to_string(),
        ItemOutcome::Busy(_) => "already running".to_string(),
        ItemOutcome::Discarded(_) => "discarded".to_string(),
        ItemOutcome::NoScenario => "no scenario".to_string(),
    }
}

fn print_outcome(ws: &Workspace, outcome: &ItemOutcome) {
    let Some(scenario) = ws.session.scenario() else {
        return;
    };
    match outcome {
        ItemOutcome::Completed {
            result,
            overage_charge,
        } => {
            if let Some(charge) = overage_charge {
                println!(
                    "  {} Overage billed: ${:.2}",
                    "\u{26a1}".yellow(),
                    charge
                );
            }
            println!();
            print!("{}", terminal::format_report(result, scenario.theme));
            println!();
            print_header(ws);
        }
        ItemOutcome::Denied(item) => {
            println!(
                "  {} Free limit reached. '{}' needs the {} plan.",
                "\u{1f512}".red(),
                item,
                scenario.pro_plan.name
            );
            print_paywall(ws);
        }
        ItemOutcome::Busy(item) => println!("  '{}' is already running.", item),
        ItemOutcome::Discarded(item) => {
            println!("  {}", format!("Result for '{}' arrived after a scenario switch.", item).dimmed())
        }
        ItemOutcome::NoScenario => println!("  No scenario selected."),
    }
}

fn print_header(ws: &Workspace) {
    if let Some(scenario) = ws.session.scenario() {
        let state = ws.session.state();
        let meter = usage_meter(state, scenario);
        println!(
            "{}",
            terminal::format_usage_header(scenario, &meter, state.tier, state.wallet_balance)
        );
    }
}

fn print_items(ws: &Workspace) {
    if let Some(scenario) = ws.session.scenario() {
        print!(
            "{}",
            terminal::format_item_list(scenario, ws.items(), |i| ws.session.has_result(i))
        );
    }
}

fn print_history(ws: &Workspace) {
    let Some(scenario) = ws.session.scenario() else {
        return;
    };
    let history = &ws.session.state().history;
    if history.is_empty() {
        println!(
            "  Ready to analyze. Pick an item and run '{}'.",
            "do <n>".bold()
        );
        return;
    }
    println!("  {} ({} generated)", "Analysis Reports".bold(), history.len());
    for result in history {
        println!();
        print!("{}", terminal::format_report(result, scenario.theme));
    }
}

fn print_paywall(ws: &Workspace) {
    if let Some(scenario) = ws.session.scenario() {
        print!("{}", terminal::format_paywall(&ws.paywall, scenario));
    }
}

fn redirect_to_payment(ws: &mut Workspace) {
    let Some(url) = ws.paywall.redirect_target().map(str::to_string) else {
        println!("  Proceed to {} before paying.", "checkout".bold());
        return;
    };
    eprintln!("{}", "  Opening secure checkout...".bold());
    if let Err(e) = open::that(&url) {
        eprintln!("  {} Could not open browser: {}", "Error:".red().bold(), e);
        eprintln!("  Visit {} to complete the purchase.", url.bold());
    }
    eprintln!(
        "  After paying, run '{}' to unlock Pro in this session.",
        "simulate".bold()
    );
}

fn print_help() {
    let rows = [
        ("items", "list items"),
        ("do <n|name>", "run the metered action on one item"),
        ("all", "run every unprocessed item concurrently"),
        ("history", "show generated reports"),
        ("status", "show the usage meter"),
        ("upgrade", "open the paywall"),
        ("checkout / back", "move between paywall steps"),
        ("pay", "open the external payment page"),
        ("simulate", "simulate a successful payment"),
        ("close", "dismiss the paywall"),
        ("admin", "show the admin dashboard"),
        ("ask <question>", "ask the admin assistant"),
        ("switch <id>", "launch another scenario (resets the account)"),
        ("quit", "exit"),
    ];
    for (cmd, desc) in rows {
        println!("  {:<18} {}", cmd.bold(), desc.dimmed());
    }
}
