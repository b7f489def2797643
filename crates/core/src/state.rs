//! Per-session account state: tier, metered usage, simulated spend, report history

use crate::report::ReportData;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Pro,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Free => write!(f, "Free"),
            Tier::Pro => write!(f, "Pro"),
        }
    }
}

/// One completed metered action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    pub item_name: String,
    /// Unix milliseconds at completion
    pub timestamp: u64,
    pub report_data: ReportData,
}

impl AnalysisResult {
    pub fn new(item_name: impl Into<String>, report_data: ReportData) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string()[..9].to_string(),
            item_name: item_name.into(),
            timestamp: now_millis(),
            report_data,
        }
    }
}

/// Simulated account for the active scenario.
///
/// `usage_count` and `wallet_balance` only ever grow while a scenario is
/// active; the entitlement engine is the only writer of either.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub tier: Tier,
    pub usage_count: u32,
    /// Simulated total spend in USD
    pub wallet_balance: f64,
    /// Newest first
    pub history: Vec<AnalysisResult>,
}

impl UserState {
    pub fn with_usage(tier: Tier, usage_count: u32) -> Self {
        Self {
            tier,
            usage_count,
            ..Self::default()
        }
    }

    pub fn has_result(&self, item: &str) -> bool {
        self.history.iter().any(|h| h.item_name == item)
    }
}

pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
