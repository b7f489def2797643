use std::sync::Mutex;
use vibewall_core::error::{ProviderError, ProviderResult};
use vibewall_core::provider::{build_query_context, FAILED_TEXT, SIMULATED_TEXT};
use vibewall_core::{
    AnalysisResult, Catalog, ContentBackend, ContentProvider, ReportData, ScenarioConfig, Tier,
    UserState,
};

fn guardian() -> ScenarioConfig {
    Catalog::builtin().get("code-guardian").unwrap().clone()
}

/// Backend that fails every call.
struct Broken;

impl ContentBackend for Broken {
    fn name(&self) -> &str {
        "broken"
    }
    fn complete(&self, _: &str) -> ProviderResult<String> {
        Err(ProviderError::Network("connection refused".to_string()))
    }
    fn list_items(&self, _: &str) -> ProviderResult<Vec<String>> {
        Err(ProviderError::Parse("not json".to_string()))
    }
    fn analyze(&self, _: &str) -> ProviderResult<ReportData> {
        Err(ProviderError::Http {
            provider: "broken".to_string(),
            status: 500,
            body: "boom".to_string(),
        })
    }
    fn chat(&self, _: &str, _: &str) -> ProviderResult<String> {
        Err(ProviderError::EmptyResponse)
    }
}

/// Backend that records the prompts it receives.
#[derive(Default)]
struct Recording {
    prompts: Mutex<Vec<String>>,
}

impl ContentBackend for Recording {
    fn name(&self) -> &str {
        "recording"
    }
    fn complete(&self, prompt: &str) -> ProviderResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("hello".to_string())
    }
    fn list_items(&self, prompt: &str) -> ProviderResult<Vec<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(vec!["one".to_string(), "two".to_string()])
    }
    fn analyze(&self, prompt: &str) -> ProviderResult<ReportData> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut report = ReportData::simulated();
        report.score = 42;
        report.summary = prompt.to_string();
        Ok(report)
    }
    fn chat(&self, system: &str, question: &str) -> ProviderResult<String> {
        self.prompts
            .lock()
            .unwrap()
            .push(format!("{system}\n---\n{question}"));
        Ok("  ".to_string())
    }
}

// --- Simulation mode ---

#[test]
fn simulated_provider_returns_placeholders() {
    let provider = ContentProvider::simulated();
    assert!(provider.is_simulated());
    assert_eq!(provider.generate_text("anything"), SIMULATED_TEXT);
    assert_eq!(
        provider.list_items("anything"),
        vec!["Mock Item A", "Mock Item B", "Mock Item C", "Mock Item D", "Mock Item E"]
    );
    let report = provider.analyze("audit ${itemName}", "repo");
    assert_eq!(report, ReportData::simulated());
    assert_eq!(report.score, 85);
    assert_eq!(report.chart.data, vec![45, 52, 49, 62, 85]);
}

#[test]
fn simulated_answer_quotes_live_state() {
    let provider = ContentProvider::simulated();
    let mut state = UserState::with_usage(Tier::Pro, 7);
    state.wallet_balance = 31.5;
    let answer = provider.answer_query("How is revenue?", &state, &guardian());
    assert!(answer.starts_with("Simulation Mode"));
    assert!(answer.contains("Pro tier"));
    assert!(answer.contains("7 action(s)"));
    assert!(answer.contains("$31.50"));
}

// --- Failure fallbacks ---

#[test]
fn failing_backend_degrades_to_fallbacks() {
    let provider = ContentProvider::new(Box::new(Broken));
    assert!(!provider.is_simulated());
    assert_eq!(provider.generate_text("x"), FAILED_TEXT);
    assert_eq!(
        provider.list_items("x"),
        vec!["Fallback Item 1", "Fallback Item 2", "Fallback Item 3"]
    );
    let report = provider.analyze("x", "repo");
    assert_eq!(report.score, 0);
    assert!(report.key_metrics.is_empty());
    assert_eq!(report.chart.title, "Error");
    let answer = provider.answer_query("why?", &UserState::default(), &guardian());
    assert!(answer.starts_with("Sorry"));
}

// --- Live backend plumbing ---

#[test]
fn analyze_renders_template_before_calling_backend() {
    let backend = Recording::default();
    let provider = ContentProvider::new(Box::new(backend));
    let report = provider.analyze("Audit '${itemName}' now. ${itemName}!", "ledger");
    assert_eq!(report.score, 42);
    assert_eq!(report.summary, "Audit 'ledger' now. ledger!");
}

#[test]
fn blank_chat_answer_is_replaced() {
    let provider = ContentProvider::new(Box::new(Recording::default()));
    let answer = provider.answer_query("q", &UserState::default(), &guardian());
    assert_eq!(answer, "No answer generated.");
}

#[test]
fn answer_query_does_not_mutate_state() {
    let provider = ContentProvider::new(Box::new(Recording::default()));
    let state = UserState::with_usage(Tier::Free, 2);
    let before = state.clone();
    provider.answer_query("q", &state, &guardian());
    assert_eq!(state, before);
}

// --- Query context ---

#[test]
fn query_context_includes_account_and_recent_reports() {
    let scenario = guardian();
    let mut state = UserState::with_usage(Tier::Free, 2);
    let mut low = ReportData::simulated();
    low.score = 12;
    state.history.push(AnalysisResult::new("ledger-service", low));

    let ctx = build_query_context(&state, &scenario);
    assert!(ctx.contains("CodeGuardian AI"));
    assert!(ctx.contains("Tier: Free"));
    assert!(ctx.contains("Scans used: 2 of 3"));
    assert!(ctx.contains("Guardian Pro at $29.00/mo"));
    assert!(ctx.contains("ledger-service: score 12 (CRITICAL)"));
}

#[test]
fn query_context_for_unlimited_pro() {
    let scenario = Catalog::builtin().get("ad-optimizer").unwrap().clone();
    let state = UserState::with_usage(Tier::Pro, 40);
    let ctx = build_query_context(&state, &scenario);
    assert!(ctx.contains("40 of unlimited"));
    assert!(!ctx.contains("Recent reports"));
}
