//! Admin-side view of the simulated account: usage, revenue and a
//! heuristic read on the customer's intent.

use crate::catalog::{PlanLimit, ScenarioConfig};
use crate::state::{Tier, UserState};
use std::fmt;

/// Stand-in divisor for unlimited plans when computing a usage percentage.
const UNLIMITED_DIVISOR: u32 = 99_999;
const BASELINE_TREND: [i64; 3] = [50, 50, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insight {
    Monitoring,
    HighEngagement,
    PaywallHit,
    ActiveSubscriber,
    WhaleUser,
}

impl Insight {
    pub fn title(&self) -> &'static str {
        match self {
            Insight::Monitoring => "Monitoring",
            Insight::HighEngagement => "High Engagement",
            Insight::PaywallHit => "Paywall Hit",
            Insight::ActiveSubscriber => "Active Subscriber",
            Insight::WhaleUser => "Whale User",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Insight::Monitoring => "User is exploring the platform.",
            Insight::HighEngagement => "User approaching free limits. Prepare upsell.",
            Insight::PaywallHit => "High conversion intent. Critical blocker active.",
            Insight::ActiveSubscriber => "Healthy usage patterns. Monitoring for overage.",
            Insight::WhaleUser => "High volume overage charges detected.",
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What the account is being billed for its latest action.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentCharge {
    /// Free tier, nothing billed
    Nothing,
    Included,
    Overage(f64),
}

impl fmt::Display for CurrentCharge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentCharge::Nothing => write!(f, "$0.00"),
            CurrentCharge::Included => write!(f, "Included"),
            CurrentCharge::Overage(cost) => write!(f, "${:.2}", cost),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminSnapshot {
    pub tier: Tier,
    pub usage: u32,
    pub limit: u32,
    pub usage_percent: f64,
    pub insight: Insight,
    pub conversion_probability: u8,
    pub revenue: f64,
    pub current_charge: CurrentCharge,
    pub reports: usize,
    /// Report scores, oldest first
    pub score_trend: Vec<i64>,
    pub trend_labels: Vec<String>,
}

impl AdminSnapshot {
    pub fn from_state(state: &UserState, scenario: &ScenarioConfig) -> Self {
        let limit = match state.tier {
            Tier::Free => scenario.free_limit,
            Tier::Pro => match scenario.pro_plan.limit {
                PlanLimit::Limited(n) => n,
                PlanLimit::Unlimited => UNLIMITED_DIVISOR,
            },
        };
        let usage_percent = if limit == 0 {
            100.0
        } else {
            state.usage_count as f64 / limit as f64 * 100.0
        };

        let (insight, conversion_probability) = match state.tier {
            Tier::Free if usage_percent >= 100.0 => (Insight::PaywallHit, 85),
            Tier::Free if usage_percent > 60.0 => (Insight::HighEngagement, 45),
            Tier::Free => (Insight::Monitoring, 10),
            Tier::Pro if state.wallet_balance > scenario.pro_plan.price * 1.5 => {
                (Insight::WhaleUser, 98)
            }
            Tier::Pro => (Insight::ActiveSubscriber, 98),
        };

        let current_charge = match (state.tier, scenario.pro_plan.limit) {
            (Tier::Free, _) => CurrentCharge::Nothing,
            (Tier::Pro, PlanLimit::Limited(n)) if state.usage_count > n => {
                CurrentCharge::Overage(scenario.pro_plan.overage_cost.unwrap_or(0.0))
            }
            (Tier::Pro, _) => CurrentCharge::Included,
        };

        let (score_trend, trend_labels) = if state.history.is_empty() {
            (BASELINE_TREND.to_vec(), Vec::new())
        } else {
            let scores: Vec<i64> = state
                .history
                .iter()
                .rev()
                .map(|h| h.report_data.score)
                .collect();
            let labels = (1..=scores.len()).map(|i| format!("Query {}", i)).collect();
            (scores, labels)
        };

        Self {
            tier: state.tier,
            usage: state.usage_count,
            limit,
            usage_percent,
            insight,
            conversion_probability,
            revenue: state.wallet_balance,
            current_charge,
            reports: state.history.len(),
            score_trend,
            trend_labels,
        }
    }
}
