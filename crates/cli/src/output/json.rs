//! JSON output formatting

use serde::{Deserialize, Serialize};
use vibewall_core::{AnalysisResult, ScenarioConfig, Tier, UserState};

use crate::workspace::ItemOutcome;

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRunOutput {
    pub scenario: String,
    pub simulated: bool,
    pub account: JsonAccount,
    pub results: Vec<AnalysisResult>,
    pub denied: Vec<String>,
    pub busy: Vec<String>,
    pub discarded: Vec<String>,
    /// Total overage billed by this run in USD
    pub overage_billed: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonAccount {
    pub tier: Tier,
    pub usage_count: u32,
    pub wallet_balance: f64,
    pub reports: usize,
}

impl JsonAccount {
    pub fn from_state(state: &UserState) -> Self {
        Self {
            tier: state.tier,
            usage_count: state.usage_count,
            wallet_balance: state.wallet_balance,
            reports: state.history.len(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonScenario {
    pub id: String,
    pub name: String,
    pub item_name: String,
    pub action_name: String,
    pub free_limit: u32,
    pub pro_plan: vibewall_core::SubscriptionPlan,
}

impl From<&ScenarioConfig> for JsonScenario {
    fn from(s: &ScenarioConfig) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            item_name: s.item_name.clone(),
            action_name: s.action_name.clone(),
            free_limit: s.free_limit,
            pro_plan: s.pro_plan.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonAnswer {
    pub scenario: String,
    pub question: String,
    pub answer: String,
    pub simulated: bool,
}

pub fn run_output(
    scenario: &ScenarioConfig,
    simulated: bool,
    state: &UserState,
    outcomes: &[ItemOutcome],
) -> JsonRunOutput {
    let mut out = JsonRunOutput {
        scenario: scenario.id.clone(),
        simulated,
        account: JsonAccount::from_state(state),
        results: Vec::new(),
        denied: Vec::new(),
        busy: Vec::new(),
        discarded: Vec::new(),
        overage_billed: 0.0,
    };
    for outcome in outcomes {
        match outcome {
            ItemOutcome::Completed {
                result,
                overage_charge,
            } => {
                out.results.push(result.clone());
                out.overage_billed += overage_charge.unwrap_or(0.0);
            }
            ItemOutcome::Denied(item) => out.denied.push(item.clone()),
            ItemOutcome::Busy(item) => out.busy.push(item.clone()),
            ItemOutcome::Discarded(item) => out.discarded.push(item.clone()),
            ItemOutcome::NoScenario => {}
        }
    }
    out
}
