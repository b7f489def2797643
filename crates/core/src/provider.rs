//! Generative content provider
//!
//! [`ContentBackend`] is the fallible seam to a real model API.
//! [`ContentProvider`] wraps an optional backend and never fails: without a
//! backend it answers with fixed simulation content, and any backend error
//! is logged and replaced with a fallback value. Nothing is retried.

use crate::catalog::{PlanLimit, ScenarioConfig};
use crate::error::ProviderResult;
use crate::report::ReportData;
use crate::state::{Tier, UserState};
use tracing::{error, warn};

pub const SIMULATED_TEXT: &str = "Simulation Mode: API Key missing. This is simulated content.";
pub const FAILED_TEXT: &str = "Error generating content. Please try again.";

const MOCK_ITEMS: &[&str] = &[
    "Mock Item A",
    "Mock Item B",
    "Mock Item C",
    "Mock Item D",
    "Mock Item E",
];
const FALLBACK_ITEMS: &[&str] = &["Fallback Item 1", "Fallback Item 2", "Fallback Item 3"];

/// How many of the newest reports are summarised for the admin chat.
const QUERY_HISTORY_WINDOW: usize = 10;

/// A model API able to serve the four content calls.
pub trait ContentBackend: Send + Sync {
    /// Short name used in logs (e.g. "gemini").
    fn name(&self) -> &str;

    /// Free-text completion.
    fn complete(&self, prompt: &str) -> ProviderResult<String>;

    /// A JSON array of item names.
    fn list_items(&self, prompt: &str) -> ProviderResult<Vec<String>>;

    /// A schema-constrained report object.
    fn analyze(&self, prompt: &str) -> ProviderResult<ReportData>;

    /// Free-text answer to `question` under a system instruction.
    fn chat(&self, system: &str, question: &str) -> ProviderResult<String>;
}

pub struct ContentProvider {
    backend: Option<Box<dyn ContentBackend>>,
}

impl ContentProvider {
    pub fn new(backend: Box<dyn ContentBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Provider with no credential: every call returns canned content.
    pub fn simulated() -> Self {
        warn!("no API key configured; content provider running in simulation mode");
        Self { backend: None }
    }

    pub fn is_simulated(&self) -> bool {
        self.backend.is_none()
    }

    pub fn generate_text(&self, prompt: &str) -> String {
        let Some(backend) = &self.backend else {
            return SIMULATED_TEXT.to_string();
        };
        match backend.complete(prompt) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => "No content generated.".to_string(),
            Err(e) => {
                error!(backend = backend.name(), "text generation failed: {}", e);
                FAILED_TEXT.to_string()
            }
        }
    }

    pub fn list_items(&self, data_prompt: &str) -> Vec<String> {
        let Some(backend) = &self.backend else {
            return to_strings(MOCK_ITEMS);
        };
        match backend.list_items(data_prompt) {
            Ok(items) => items,
            Err(e) => {
                error!(backend = backend.name(), "item listing failed: {}", e);
                to_strings(FALLBACK_ITEMS)
            }
        }
    }

    /// Renders the scenario's analysis template for `item` and requests a report.
    pub fn analyze(&self, analysis_template: &str, item: &str) -> ReportData {
        let Some(backend) = &self.backend else {
            return ReportData::simulated();
        };
        let prompt = crate::catalog::render_analysis_prompt(analysis_template, item);
        match backend.analyze(&prompt) {
            Ok(report) => report,
            Err(e) => {
                error!(backend = backend.name(), item, "report generation failed: {}", e);
                ReportData::failed()
            }
        }
    }

    /// Admin chat. Reads `state`, never mutates it.
    pub fn answer_query(&self, question: &str, state: &UserState, scenario: &ScenarioConfig) -> String {
        let Some(backend) = &self.backend else {
            return format!(
                "Simulation Mode: API Key missing. I can't reason about \"{}\" without a model, \
                 but the account is on the {} tier with {} action(s) used and ${:.2} billed.",
                question.trim(),
                state.tier,
                state.usage_count,
                state.wallet_balance
            );
        };
        let system = build_query_context(state, scenario);
        match backend.chat(&system, question) {
            Ok(answer) if !answer.trim().is_empty() => answer,
            Ok(_) => "No answer generated.".to_string(),
            Err(e) => {
                error!(backend = backend.name(), "admin query failed: {}", e);
                "Sorry, I couldn't analyze that right now. Please try again.".to_string()
            }
        }
    }
}

/// System instruction grounding the admin chat in the live account.
pub fn build_query_context(state: &UserState, scenario: &ScenarioConfig) -> String {
    let limit = match state.tier {
        Tier::Free => scenario.free_limit.to_string(),
        Tier::Pro => match scenario.pro_plan.limit {
            PlanLimit::Limited(n) => n.to_string(),
            PlanLimit::Unlimited => "unlimited".to_string(),
        },
    };

    let mut ctx = format!(
        "You are a revenue and product analytics assistant for \"{name}\", a usage-billed AI \
         product. Answer the operator's question in at most 4 sentences using only the data \
         below. Be concrete and cite numbers.\n\n\
         Account:\n\
         - Tier: {tier}\n\
         - {action}s used: {used} of {limit}\n\
         - Free limit: {free}\n\
         - Pro plan: {plan} at ${price:.2}/{interval}, overage ${overage:.2} per {item}\n\
         - Total billed: ${balance:.2}\n\
         - Reports generated: {reports}\n",
        name = scenario.name,
        tier = state.tier,
        action = scenario.action_name,
        used = state.usage_count,
        limit = limit,
        free = scenario.free_limit,
        plan = scenario.pro_plan.name,
        price = scenario.pro_plan.price,
        interval = scenario.pro_plan.interval.short(),
        overage = scenario.pro_plan.overage_cost.unwrap_or(0.0),
        item = scenario.item_name.to_lowercase(),
        balance = state.wallet_balance,
        reports = state.history.len(),
    );

    if !state.history.is_empty() {
        ctx.push_str("\nRecent reports (newest first):\n");
        for result in state.history.iter().take(QUERY_HISTORY_WINDOW) {
            ctx.push_str(&format!(
                "- {}: score {} ({})\n",
                result.item_name,
                result.report_data.score,
                result.report_data.status()
            ));
        }
    }
    ctx
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
