//! VibeWall Core - entitlement and metering engine
//!
//! This crate holds everything with decision logic in the VibeWall product
//! simulator:
//! - Scenario catalog and subscription plans
//! - Tier/usage/wallet state and the metering rules that advance it
//! - A session that owns that state and drops stale provider completions
//! - Paywall flow, admin insight, and the content provider facade with its
//!   simulation mode

pub mod catalog;
pub mod config;
pub mod entitlement;
pub mod error;
pub mod insight;
pub mod paywall;
pub mod provider;
pub mod report;
pub mod session;
pub mod state;

pub use catalog::{Catalog, PlanLimit, ScenarioConfig, SubscriptionPlan};
pub use config::VibewallConfig;
pub use entitlement::{evaluate_action, upgrade, Decision, UsageMeter};
pub use error::ProviderError;
pub use insight::{AdminSnapshot, Insight};
pub use paywall::{Paywall, PaywallStep};
pub use provider::{ContentBackend, ContentProvider};
pub use report::{ReportData, ScoreStatus};
pub use session::{ActionOutcome, Completion, PendingAction, Session};
pub use state::{AnalysisResult, Tier, UserState};

/// VibeWall version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
