use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use vibewall_cli::workspace::ItemOutcome;
use vibewall_cli::Workspace;
use vibewall_core::error::{ProviderError, ProviderResult};
use vibewall_core::{
    Catalog, ContentBackend, ContentProvider, Paywall, PaywallStep, ReportData, ScenarioConfig,
    Tier,
};

fn guardian() -> ScenarioConfig {
    Catalog::builtin().get("code-guardian").unwrap().clone()
}

fn simulated() -> Workspace {
    let mut ws = Workspace::new(ContentProvider::simulated(), Paywall::default());
    ws.launch(guardian());
    ws
}

/// Backend whose report latency shrinks with the item index, so later
/// requests finish first.
struct Staggered {
    calls: AtomicUsize,
}

impl ContentBackend for Staggered {
    fn name(&self) -> &str {
        "staggered"
    }
    fn complete(&self, _: &str) -> ProviderResult<String> {
        Ok("welcome".to_string())
    }
    fn list_items(&self, _: &str) -> ProviderResult<Vec<String>> {
        Ok(vec!["r1".into(), "r2".into(), "r3".into()])
    }
    fn analyze(&self, prompt: &str) -> ProviderResult<ReportData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = if prompt.contains("r1") { 150 } else { 10 };
        thread::sleep(Duration::from_millis(delay));
        let mut report = ReportData::simulated();
        report.summary = prompt.to_string();
        Ok(report)
    }
    fn chat(&self, _: &str, _: &str) -> ProviderResult<String> {
        Err(ProviderError::EmptyResponse)
    }
}

// --- Launch ---

#[test]
fn launch_lists_mock_items_and_resets() {
    let mut ws = simulated();
    assert_eq!(ws.items().len(), 5);
    ws.act("Mock Item A");
    ws.session.upgrade();

    ws.launch(guardian());
    assert_eq!(ws.session.state().usage_count, 0);
    assert_eq!(ws.session.state().tier, Tier::Free);
    assert!(!ws.paywall.is_open());
}

#[test]
fn resolve_item_by_index_or_name() {
    let ws = simulated();
    assert_eq!(ws.resolve_item("1").as_deref(), Some("Mock Item A"));
    assert_eq!(ws.resolve_item("5").as_deref(), Some("Mock Item E"));
    assert_eq!(ws.resolve_item("mock item c").as_deref(), Some("Mock Item C"));
    assert!(ws.resolve_item("0").is_none());
    assert!(ws.resolve_item("6").is_none());
    assert!(ws.resolve_item("Something Else").is_none());
}

// --- Single actions ---

#[test]
fn act_until_paywall() {
    let mut ws = simulated();
    for item in ["Mock Item A", "Mock Item B", "Mock Item C"] {
        match ws.act(item) {
            ItemOutcome::Completed {
                result,
                overage_charge,
            } => {
                assert_eq!(result.item_name, item);
                assert_eq!(result.report_data.score, 85);
                assert!(overage_charge.is_none());
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }
    assert_eq!(ws.session.state().usage_count, 3);
    assert_eq!(ws.session.state().history.len(), 3);
    assert!(!ws.paywall.is_open());

    assert_eq!(ws.act("Mock Item D"), ItemOutcome::Denied("Mock Item D".into()));
    assert_eq!(ws.paywall.step(), PaywallStep::Plans);
    assert_eq!(ws.session.state().usage_count, 3);
}

#[test]
fn act_after_simulated_purchase() {
    let mut ws = simulated();
    for _ in 0..3 {
        ws.act("Mock Item A");
    }
    ws.act("Mock Item B");
    assert!(ws.paywall.is_open());

    assert!(ws.paywall.simulate_success(&mut ws.session));
    assert!(matches!(ws.act("Mock Item B"), ItemOutcome::Completed { .. }));
    assert_eq!(ws.session.state().tier, Tier::Pro);
    assert_eq!(ws.session.state().usage_count, 4);
    assert_eq!(ws.session.state().wallet_balance, 29.0);
}

#[test]
fn act_without_scenario() {
    let mut ws = Workspace::new(ContentProvider::simulated(), Paywall::default());
    assert_eq!(ws.act("x"), ItemOutcome::NoScenario);
    assert!(ws.ask("anything").is_none());
    assert!(ws.briefing().is_none());
}

// --- Batches ---

#[test]
fn act_many_meters_in_request_order() {
    let mut ws = simulated();
    let items: Vec<String> = ws.items().to_vec();
    let outcomes = ws.act_many(&items);

    let completed: Vec<&str> = outcomes
        .iter()
        .filter_map(|o| match o {
            ItemOutcome::Completed { result, .. } => Some(result.item_name.as_str()),
            _ => None,
        })
        .collect();
    let denied: Vec<&ItemOutcome> = outcomes
        .iter()
        .filter(|o| matches!(o, ItemOutcome::Denied(_)))
        .collect();

    assert_eq!(completed.len(), 3);
    assert!(completed.contains(&"Mock Item A"));
    assert!(completed.contains(&"Mock Item C"));
    assert_eq!(
        denied,
        vec![
            &ItemOutcome::Denied("Mock Item D".into()),
            &ItemOutcome::Denied("Mock Item E".into())
        ]
    );
    assert_eq!(ws.session.state().usage_count, 3);
    assert_eq!(ws.session.state().history.len(), 3);
    assert!(ws.paywall.is_open());
}

#[test]
fn act_many_duplicate_item_is_busy() {
    let mut ws = simulated();
    let items = vec!["Mock Item A".to_string(), "Mock Item A".to_string()];
    let outcomes = ws.act_many(&items);
    assert!(outcomes.contains(&ItemOutcome::Busy("Mock Item A".into())));
    assert_eq!(ws.session.state().usage_count, 1);
    assert!(!ws.session.in_flight("Mock Item A"));
}

#[test]
fn act_many_applies_results_in_arrival_order() {
    let backend = Staggered {
        calls: AtomicUsize::new(0),
    };
    let mut ws = Workspace::new(ContentProvider::new(Box::new(backend)), Paywall::default());
    let mut scenario = guardian();
    scenario.analysis_prompt = "Audit ${itemName}".to_string();
    ws.launch(scenario);
    ws.session.upgrade();

    let items = ws.items().to_vec();
    let outcomes = ws.act_many(&items);
    assert_eq!(outcomes.len(), 3);

    let history = &ws.session.state().history;
    assert_eq!(history.len(), 3);
    // Slowest request lands last and so sits at the front
    assert_eq!(history[0].item_name, "r1");
    assert_eq!(history[0].report_data.summary, "Audit r1");
    assert_eq!(ws.session.state().usage_count, 3);
}

#[test]
fn briefing_and_ask_use_provider() {
    let ws = simulated();
    assert!(ws.briefing().unwrap().starts_with("Simulation Mode"));
    let answer = ws.ask("Will they convert?").unwrap();
    assert!(answer.contains("Free tier"));
}
