//! Session — the single owner of the active scenario's account state
//!
//! Views receive `&Session` to render and `&mut Session` to act; there is no
//! other copy of [`UserState`]. Every scenario selection bumps an epoch, and
//! a completion carrying an older epoch is dropped so a slow response can
//! never land in the next scenario's history.

use crate::catalog::ScenarioConfig;
use crate::entitlement::{self, Decision};
use crate::report::ReportData;
use crate::state::{AnalysisResult, UserState};
use std::collections::HashSet;
use tracing::{debug, info};

/// Ticket for a provider call that the engine has already allowed and metered.
/// Not `Clone`: one ticket completes at most once.
#[derive(Debug, PartialEq)]
pub struct PendingAction {
    epoch: u64,
    pub item: String,
    pub overage_charge: Option<f64>,
}

#[derive(Debug, PartialEq)]
pub enum ActionOutcome {
    NoScenario,
    /// A request for this item is still outstanding.
    Busy,
    /// Quota exhausted; the paywall must be shown.
    Denied,
    Dispatched(PendingAction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Applied(AnalysisResult),
    /// The scenario changed while the call was in flight.
    Discarded,
}

#[derive(Debug, Default)]
pub struct Session {
    scenario: Option<ScenarioConfig>,
    state: UserState,
    epoch: u64,
    in_flight: HashSet<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scenario(scenario: ScenarioConfig) -> Self {
        let mut session = Self::new();
        session.select_scenario(scenario);
        session
    }

    /// Activates `scenario` and resets the account to a fresh Free state.
    pub fn select_scenario(&mut self, scenario: ScenarioConfig) {
        info!(scenario = %scenario.id, "scenario selected");
        self.scenario = Some(scenario);
        self.state = UserState::default();
        self.epoch += 1;
        self.in_flight.clear();
    }

    pub fn scenario(&self) -> Option<&ScenarioConfig> {
        self.scenario.as_ref()
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    pub fn in_flight(&self, item: &str) -> bool {
        self.in_flight.contains(item)
    }

    pub fn has_result(&self, item: &str) -> bool {
        self.state.has_result(item)
    }

    /// Meters a request for `item`. On `Dispatched` the caller owns the
    /// provider call and must hand the ticket back to [`Self::complete_action`].
    pub fn request_action(&mut self, item: &str) -> ActionOutcome {
        let Some(scenario) = &self.scenario else {
            return ActionOutcome::NoScenario;
        };
        if self.in_flight.contains(item) {
            debug!(item, "request already in flight");
            return ActionOutcome::Busy;
        }
        match entitlement::evaluate_action(&mut self.state, scenario) {
            Decision::Denied => {
                info!(item, usage = self.state.usage_count, "action denied, paywall required");
                ActionOutcome::Denied
            }
            Decision::Allowed { overage_charge } => {
                self.in_flight.insert(item.to_string());
                ActionOutcome::Dispatched(PendingAction {
                    epoch: self.epoch,
                    item: item.to_string(),
                    overage_charge,
                })
            }
        }
    }

    /// Records the provider's report for a dispatched action. Usage is not
    /// counted again here.
    pub fn complete_action(&mut self, pending: PendingAction, report: ReportData) -> Completion {
        if pending.epoch != self.epoch {
            debug!(item = %pending.item, "discarding completion from a previous scenario");
            return Completion::Discarded;
        }
        if !self.in_flight.remove(&pending.item) {
            debug!(item = %pending.item, "discarding completion for an item not in flight");
            return Completion::Discarded;
        }
        let result = AnalysisResult::new(pending.item, report);
        self.state.history.insert(0, result.clone());
        Completion::Applied(result)
    }

    /// Upgrades to Pro. Returns `false` when no scenario is active.
    pub fn upgrade(&mut self) -> bool {
        let Some(scenario) = &self.scenario else {
            return false;
        };
        entitlement::upgrade(&mut self.state, scenario);
        info!(balance = self.state.wallet_balance, "upgrade applied");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn dispatched(session: &mut Session, item: &str) -> PendingAction {
        match session.request_action(item) {
            ActionOutcome::Dispatched(p) => p,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_ticket_completes_once() {
        let scenario = Catalog::builtin().get("code-guardian").cloned().unwrap();
        let mut session = Session::with_scenario(scenario);
        let pending = dispatched(&mut session, "repo");
        let duplicate = PendingAction {
            epoch: pending.epoch,
            item: pending.item.clone(),
            overage_charge: pending.overage_charge,
        };

        assert!(matches!(
            session.complete_action(pending, ReportData::simulated()),
            Completion::Applied(_)
        ));
        assert_eq!(
            session.complete_action(duplicate, ReportData::simulated()),
            Completion::Discarded
        );
        assert_eq!(session.state().usage_count, 1);
        assert_eq!(session.state().history.len(), 1);
    }

    #[test]
    fn ticket_for_unknown_item_is_discarded() {
        let scenario = Catalog::builtin().get("code-guardian").cloned().unwrap();
        let mut session = Session::with_scenario(scenario);
        let forged = PendingAction {
            epoch: session.epoch,
            item: "never-requested".to_string(),
            overage_charge: None,
        };
        assert_eq!(
            session.complete_action(forged, ReportData::simulated()),
            Completion::Discarded
        );
        assert!(session.state().history.is_empty());
    }
}
