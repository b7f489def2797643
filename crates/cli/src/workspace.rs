//! Workspace — wires the session, paywall and content provider together
//!
//! The session decides and meters; the workspace runs the provider calls the
//! session allowed and hands the reports back to it.

use rayon::prelude::*;
use std::sync::mpsc;
use tracing::{debug, info};
use vibewall_core::session::{ActionOutcome, Completion, PendingAction};
use vibewall_core::{AnalysisResult, ContentProvider, Paywall, ReportData, ScenarioConfig, Session};

/// Result of one requested action, as the views report it.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Completed {
        result: AnalysisResult,
        overage_charge: Option<f64>,
    },
    /// Quota exhausted; the paywall was opened.
    Denied(String),
    Busy(String),
    /// Finished after a scenario switch and was dropped.
    Discarded(String),
    NoScenario,
}

pub struct Workspace {
    pub session: Session,
    pub paywall: Paywall,
    provider: ContentProvider,
    items: Vec<String>,
}

impl Workspace {
    pub fn new(provider: ContentProvider, paywall: Paywall) -> Self {
        Self {
            session: Session::new(),
            paywall,
            provider,
            items: Vec::new(),
        }
    }

    pub fn provider(&self) -> &ContentProvider {
        &self.provider
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Selects `scenario` (resetting the account) and loads its items.
    pub fn launch(&mut self, scenario: ScenarioConfig) -> &[String] {
        self.paywall.close();
        let data_prompt = scenario.data_prompt.clone();
        self.session.select_scenario(scenario);
        self.items = self.provider.list_items(&data_prompt);
        info!(count = self.items.len(), "items loaded");
        &self.items
    }

    /// Resolves a 1-based index or a listed item name (case-insensitive).
    pub fn resolve_item(&self, arg: &str) -> Option<String> {
        if let Ok(n) = arg.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| self.items.get(i))
                .cloned();
        }
        self.items
            .iter()
            .find(|i| i.eq_ignore_ascii_case(arg))
            .cloned()
    }

    /// Runs a single metered action to completion.
    pub fn act(&mut self, item: &str) -> ItemOutcome {
        match self.session.request_action(item) {
            ActionOutcome::Dispatched(pending) => {
                let report = self.analyze(&pending);
                self.finish(pending, report)
            }
            ActionOutcome::Denied => self.deny(item),
            ActionOutcome::Busy => ItemOutcome::Busy(item.to_string()),
            ActionOutcome::NoScenario => ItemOutcome::NoScenario,
        }
    }

    /// Meters every item in order, then runs the allowed provider calls in
    /// parallel. Reports are applied in the order they arrive.
    pub fn act_many(&mut self, items: &[String]) -> Vec<ItemOutcome> {
        let mut outcomes = Vec::new();
        let mut pending = Vec::new();
        for item in items {
            match self.session.request_action(item) {
                ActionOutcome::Dispatched(p) => pending.push(p),
                ActionOutcome::Denied => outcomes.push(self.deny(item)),
                ActionOutcome::Busy => outcomes.push(ItemOutcome::Busy(item.to_string())),
                ActionOutcome::NoScenario => outcomes.push(ItemOutcome::NoScenario),
            }
        }
        if pending.is_empty() {
            return outcomes;
        }

        let template = match self.session.scenario() {
            Some(s) => s.analysis_prompt.clone(),
            None => return outcomes,
        };
        debug!(count = pending.len(), "dispatching provider calls");

        let (tx, rx) = mpsc::channel::<(PendingAction, ReportData)>();
        let provider = &self.provider;
        let session = &mut self.session;
        std::thread::scope(|s| {
            s.spawn(move || {
                pending.into_par_iter().for_each_with(tx, |tx, p| {
                    let report = provider.analyze(&template, &p.item);
                    let _ = tx.send((p, report));
                });
            });
            // Ends once every sender clone is dropped, i.e. all calls returned
            for (p, report) in rx {
                outcomes.push(apply(session, p, report));
            }
        });
        outcomes
    }

    fn analyze(&self, pending: &PendingAction) -> ReportData {
        match self.session.scenario() {
            Some(s) => self.provider.analyze(&s.analysis_prompt, &pending.item),
            None => ReportData::failed(),
        }
    }

    fn finish(&mut self, pending: PendingAction, report: ReportData) -> ItemOutcome {
        apply(&mut self.session, pending, report)
    }

    fn deny(&mut self, item: &str) -> ItemOutcome {
        self.paywall.open();
        ItemOutcome::Denied(item.to_string())
    }

    /// Admin chat over the live session state.
    pub fn ask(&self, question: &str) -> Option<String> {
        let scenario = self.session.scenario()?;
        Some(
            self.provider
                .answer_query(question, self.session.state(), scenario),
        )
    }

    pub fn briefing(&self) -> Option<String> {
        let scenario = self.session.scenario()?;
        let prompt = format!(
            "In two sentences, welcome a new user to {} ({}). Mention that the free plan \
             includes {} {}s.",
            scenario.name, scenario.description, scenario.free_limit, scenario.action_name
        );
        Some(self.provider.generate_text(&prompt))
    }
}

fn apply(session: &mut Session, pending: PendingAction, report: ReportData) -> ItemOutcome {
    let item = pending.item.clone();
    let overage_charge = pending.overage_charge;
    match session.complete_action(pending, report) {
        Completion::Applied(result) => ItemOutcome::Completed {
            result,
            overage_charge,
        },
        Completion::Discarded => ItemOutcome::Discarded(item),
    }
}
