//! Scenario catalog — the demo products a user can launch
//!
//! Built-in scenarios are compiled in; `.vibewall.toml` may append more via
//! `[[scenarios]]`. Entries are read as-is and never mutated after load.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder substituted with the selected item in analysis prompts.
pub const ITEM_PLACEHOLDER: &str = "${itemName}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    #[default]
    Month,
    Year,
}

impl BillingInterval {
    pub fn short(&self) -> &'static str {
        match self {
            BillingInterval::Month => "mo",
            BillingInterval::Year => "yr",
        }
    }
}

/// Included usage on a plan: a number of actions, or no cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLimit", into = "RawLimit")]
pub enum PlanLimit {
    Limited(u32),
    Unlimited,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawLimit {
    Count(u32),
    Word(String),
}

impl TryFrom<RawLimit> for PlanLimit {
    type Error = String;

    fn try_from(raw: RawLimit) -> Result<Self, Self::Error> {
        match raw {
            RawLimit::Count(n) => Ok(PlanLimit::Limited(n)),
            RawLimit::Word(w) if w.eq_ignore_ascii_case("unlimited") => Ok(PlanLimit::Unlimited),
            RawLimit::Word(w) => Err(format!(
                "invalid plan limit '{}': expected an integer or \"unlimited\"",
                w
            )),
        }
    }
}

impl From<PlanLimit> for RawLimit {
    fn from(limit: PlanLimit) -> Self {
        match limit {
            PlanLimit::Limited(n) => RawLimit::Count(n),
            PlanLimit::Unlimited => RawLimit::Word("unlimited".to_string()),
        }
    }
}

impl fmt::Display for PlanLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanLimit::Limited(n) => write!(f, "{}", n),
            PlanLimit::Unlimited => write!(f, "\u{221e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub interval: BillingInterval,
    pub limit: PlanLimit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overage_cost: Option<f64>,
    #[serde(default)]
    pub description: String,
}

/// Accent colour for a scenario. Renderers map each variant explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Indigo,
    Emerald,
    Blue,
    Purple,
    Rose,
    Amber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScenarioIcon {
    ShieldAlert,
    BarChart,
    Scale,
    TrendingUp,
    Users,
    Database,
    #[default]
    #[serde(other)]
    Zap,
}

impl ScenarioIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            ScenarioIcon::ShieldAlert => "\u{1f6e1}",
            ScenarioIcon::BarChart => "\u{1f4ca}",
            ScenarioIcon::Scale => "\u{2696}",
            ScenarioIcon::TrendingUp => "\u{1f4c8}",
            ScenarioIcon::Users => "\u{1f465}",
            ScenarioIcon::Database => "\u{1f5c4}",
            ScenarioIcon::Zap => "\u{26a1}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: ScenarioIcon,
    #[serde(default)]
    pub theme: Theme,

    /// Singular noun for the things being acted on (e.g. "Repository")
    pub item_name: String,
    /// Verb on the action button (e.g. "Scan")
    pub action_name: String,

    /// Prompt that asks the model for a list of item names
    pub data_prompt: String,
    /// Prompt template for a single report; `${itemName}` is substituted
    pub analysis_prompt: String,

    pub free_limit: u32,
    pub pro_plan: SubscriptionPlan,
}

/// Substitutes every `${itemName}` in `template`.
pub fn render_analysis_prompt(template: &str, item: &str) -> String {
    template.replace(ITEM_PLACEHOLDER, item)
}

/// Ordered collection of scenarios.
#[derive(Debug, Clone)]
pub struct Catalog {
    scenarios: Vec<ScenarioConfig>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            scenarios: builtin_scenarios(),
        }
    }

    /// Appends config-defined scenarios. An id already present replaces the
    /// existing entry in place so ordering stays stable.
    pub fn with_extra(mut self, extra: Vec<ScenarioConfig>) -> Self {
        for scenario in extra {
            match self.scenarios.iter_mut().find(|s| s.id == scenario.id) {
                Some(slot) => *slot = scenario,
                None => self.scenarios.push(scenario),
            }
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioConfig> {
        self.scenarios.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ScenarioConfig> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_scenarios() -> Vec<ScenarioConfig> {
    vec![
        ScenarioConfig {
            id: "code-guardian".to_string(),
            name: "CodeGuardian AI".to_string(),
            description: "Security scanner that audits repositories for vulnerabilities, \
                          leaked secrets and outdated dependencies."
                .to_string(),
            icon: ScenarioIcon::ShieldAlert,
            theme: Theme::Emerald,
            item_name: "Repository".to_string(),
            action_name: "Scan".to_string(),
            data_prompt: "Generate 6 realistic names of software repositories belonging to a \
                          mid-sized fintech company (e.g. 'payments-gateway')."
                .to_string(),
            analysis_prompt: "Perform a security audit of the repository '${itemName}'. Report \
                              vulnerability counts by severity, dependency health and a \
                              remediation priority."
                .to_string(),
            free_limit: 3,
            pro_plan: SubscriptionPlan {
                name: "Guardian Pro".to_string(),
                price: 29.0,
                interval: BillingInterval::Month,
                limit: PlanLimit::Limited(50),
                overage_cost: Some(0.5),
                description: "50 scans per month, then $0.50 per scan.".to_string(),
            },
        },
        ScenarioConfig {
            id: "ad-optimizer".to_string(),
            name: "AdSpend Optimizer".to_string(),
            description: "Marketing analyst that reviews ad campaigns and finds wasted spend."
                .to_string(),
            icon: ScenarioIcon::BarChart,
            theme: Theme::Blue,
            item_name: "Campaign".to_string(),
            action_name: "Analyze".to_string(),
            data_prompt: "Generate 6 realistic names of paid advertising campaigns for a \
                          direct-to-consumer coffee brand."
                .to_string(),
            analysis_prompt: "Analyze the performance of the ad campaign '${itemName}'. Include \
                              ROAS, cost per acquisition, click-through rate and a weekly \
                              spend trend."
                .to_string(),
            free_limit: 2,
            pro_plan: SubscriptionPlan {
                name: "Growth Plan".to_string(),
                price: 49.0,
                interval: BillingInterval::Month,
                limit: PlanLimit::Unlimited,
                overage_cost: None,
                description: "Unlimited campaign analyses.".to_string(),
            },
        },
        ScenarioConfig {
            id: "contract-lens".to_string(),
            name: "ContractLens Legal".to_string(),
            description: "Contract reviewer that flags risky clauses and missing protections."
                .to_string(),
            icon: ScenarioIcon::Scale,
            theme: Theme::Purple,
            item_name: "Contract".to_string(),
            action_name: "Review".to_string(),
            data_prompt: "Generate 6 realistic titles of commercial contracts a SaaS startup \
                          might need reviewed (e.g. 'Master Services Agreement - Acme Corp')."
                .to_string(),
            analysis_prompt: "Review the contract '${itemName}'. Identify risky clauses, \
                              liability exposure and negotiation leverage, and score overall \
                              contract health."
                .to_string(),
            free_limit: 3,
            pro_plan: SubscriptionPlan {
                name: "Counsel Plan".to_string(),
                price: 99.0,
                interval: BillingInterval::Month,
                limit: PlanLimit::Limited(5),
                overage_cost: Some(2.0),
                description: "5 reviews per month, then $2.00 per review.".to_string(),
            },
        },
    ]
}
