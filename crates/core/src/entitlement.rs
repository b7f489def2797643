//! Entitlement and metering engine
//!
//! Decides whether a metered action is allowed for the current tier and
//! usage, advances the usage counter, and accrues overage and subscription
//! charges into the simulated wallet. Each allowed action increments
//! `usage_count` exactly once, here; completing the action does not count
//! it again.

use crate::catalog::{PlanLimit, ScenarioConfig};
use crate::state::{Tier, UserState};
use tracing::debug;

/// Outcome of [`evaluate_action`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// The action may proceed. `overage_charge` is set when it was billed
    /// beyond the plan's included usage.
    Allowed { overage_charge: Option<f64> },
    /// Free quota exhausted. Show the paywall; do not call the provider.
    Denied,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed { .. })
    }
}

/// Evaluates one requested action and applies its metering side effects.
pub fn evaluate_action(state: &mut UserState, scenario: &ScenarioConfig) -> Decision {
    match state.tier {
        Tier::Pro => {
            let over_limit = match scenario.pro_plan.limit {
                PlanLimit::Limited(limit) => state.usage_count >= limit,
                PlanLimit::Unlimited => false,
            };
            state.usage_count += 1;
            if over_limit {
                let charge = scenario.pro_plan.overage_cost.unwrap_or(0.0);
                state.wallet_balance += charge;
                debug!(usage = state.usage_count, charge, "pro overage action");
                Decision::Allowed {
                    overage_charge: Some(charge),
                }
            } else {
                debug!(usage = state.usage_count, "pro action within plan");
                Decision::Allowed {
                    overage_charge: None,
                }
            }
        }
        Tier::Free => {
            if state.usage_count < scenario.free_limit {
                state.usage_count += 1;
                debug!(usage = state.usage_count, limit = scenario.free_limit, "free action");
                Decision::Allowed {
                    overage_charge: None,
                }
            } else {
                debug!(usage = state.usage_count, limit = scenario.free_limit, "free quota exhausted");
                Decision::Denied
            }
        }
    }
}

/// Moves the account to Pro and books the first subscription charge.
///
/// Repeated calls keep the tier at Pro but charge the plan price again.
pub fn upgrade(state: &mut UserState, scenario: &ScenarioConfig) {
    state.tier = Tier::Pro;
    state.wallet_balance += scenario.pro_plan.price;
    debug!(
        plan = %scenario.pro_plan.name,
        price = scenario.pro_plan.price,
        balance = state.wallet_balance,
        "upgraded to pro"
    );
}

/// True when a Free account has used its whole quota.
pub fn is_locked(state: &UserState, scenario: &ScenarioConfig) -> bool {
    state.tier == Tier::Free && state.usage_count >= scenario.free_limit
}

/// Usage-meter view of the current plan, as shown in the workspace header.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageMeter {
    pub used: u32,
    pub limit: PlanLimit,
    /// Not clamped; renderers cap the bar at 100%.
    pub percent: f64,
    pub locked: bool,
    pub plan_label: String,
}

pub fn usage_meter(state: &UserState, scenario: &ScenarioConfig) -> UsageMeter {
    let (limit, plan_label) = match state.tier {
        Tier::Free => (PlanLimit::Limited(scenario.free_limit), "Free Plan".to_string()),
        Tier::Pro => (scenario.pro_plan.limit, scenario.pro_plan.name.clone()),
    };
    let percent = match limit {
        PlanLimit::Limited(0) => 100.0,
        PlanLimit::Limited(n) => state.usage_count as f64 / n as f64 * 100.0,
        PlanLimit::Unlimited => 0.0,
    };
    UsageMeter {
        used: state.usage_count,
        limit,
        percent,
        locked: is_locked(state, scenario),
        plan_label,
    }
}
