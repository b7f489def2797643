use vibewall_core::catalog::PlanLimit;
use vibewall_core::insight::{CurrentCharge, Insight};
use vibewall_core::{AdminSnapshot, AnalysisResult, Catalog, ReportData, ScenarioConfig, Tier, UserState};

fn lens() -> ScenarioConfig {
    // free 3, Counsel Plan $99, limit 5, overage $2
    Catalog::builtin().get("contract-lens").unwrap().clone()
}

fn report(score: i64) -> ReportData {
    let mut r = ReportData::simulated();
    r.score = score;
    r
}

#[test]
fn free_tier_insight_bands() {
    let s = lens();
    let cases = [
        (0, Insight::Monitoring, 10),
        (1, Insight::Monitoring, 10),
        (2, Insight::HighEngagement, 45),
        (3, Insight::PaywallHit, 85),
    ];
    for (usage, insight, probability) in cases {
        let snap = AdminSnapshot::from_state(&UserState::with_usage(Tier::Free, usage), &s);
        assert_eq!(snap.insight, insight, "usage {usage}");
        assert_eq!(snap.conversion_probability, probability);
        assert_eq!(snap.current_charge, CurrentCharge::Nothing);
        assert_eq!(snap.limit, 3);
    }
}

#[test]
fn exactly_sixty_percent_is_still_monitoring() {
    let mut s = lens();
    s.free_limit = 5;
    let snap = AdminSnapshot::from_state(&UserState::with_usage(Tier::Free, 3), &s);
    assert_eq!(snap.usage_percent, 60.0);
    assert_eq!(snap.insight, Insight::Monitoring);
}

#[test]
fn zero_free_limit_reads_as_paywall_hit() {
    let mut s = lens();
    s.free_limit = 0;
    let snap = AdminSnapshot::from_state(&UserState::default(), &s);
    assert_eq!(snap.usage_percent, 100.0);
    assert_eq!(snap.insight, Insight::PaywallHit);
}

#[test]
fn pro_subscriber_and_whale() {
    let s = lens();
    let mut state = UserState::with_usage(Tier::Pro, 4);
    state.wallet_balance = 99.0;
    let snap = AdminSnapshot::from_state(&state, &s);
    assert_eq!(snap.insight, Insight::ActiveSubscriber);
    assert_eq!(snap.conversion_probability, 98);
    assert_eq!(snap.current_charge, CurrentCharge::Included);
    assert_eq!(snap.current_charge.to_string(), "Included");

    // 1.5 x $99 = $148.50; the comparison is strict
    state.wallet_balance = 148.5;
    assert_eq!(AdminSnapshot::from_state(&state, &s).insight, Insight::ActiveSubscriber);
    state.wallet_balance = 149.0;
    let snap = AdminSnapshot::from_state(&state, &s);
    assert_eq!(snap.insight, Insight::WhaleUser);
    assert_eq!(snap.insight.description(), "High volume overage charges detected.");
    assert_eq!(snap.revenue, 149.0);
}

#[test]
fn pro_over_limit_shows_overage_charge() {
    let s = lens();
    let snap = AdminSnapshot::from_state(&UserState::with_usage(Tier::Pro, 5), &s);
    assert_eq!(snap.current_charge, CurrentCharge::Included);

    let snap = AdminSnapshot::from_state(&UserState::with_usage(Tier::Pro, 6), &s);
    assert_eq!(snap.current_charge, CurrentCharge::Overage(2.0));
    assert_eq!(snap.current_charge.to_string(), "$2.00");
    assert_eq!(snap.usage_percent, 120.0);
}

#[test]
fn unlimited_plan_uses_large_divisor() {
    let mut s = lens();
    s.pro_plan.limit = PlanLimit::Unlimited;
    let snap = AdminSnapshot::from_state(&UserState::with_usage(Tier::Pro, 500), &s);
    assert_eq!(snap.limit, 99_999);
    assert!(snap.usage_percent < 1.0);
    assert_eq!(snap.current_charge, CurrentCharge::Included);
}

#[test]
fn score_trend_is_oldest_first() {
    let s = lens();
    let mut state = UserState::with_usage(Tier::Free, 3);
    // history is newest first
    state.history = vec![
        AnalysisResult::new("third", report(90)),
        AnalysisResult::new("second", report(40)),
        AnalysisResult::new("first", report(70)),
    ];
    let snap = AdminSnapshot::from_state(&state, &s);
    assert_eq!(snap.score_trend, vec![70, 40, 90]);
    assert_eq!(snap.trend_labels, vec!["Query 1", "Query 2", "Query 3"]);
    assert_eq!(snap.reports, 3);
}

#[test]
fn empty_history_uses_baseline_trend() {
    let snap = AdminSnapshot::from_state(&UserState::default(), &lens());
    assert_eq!(snap.score_trend, vec![50, 50, 50]);
    assert!(snap.trend_labels.is_empty());
    assert_eq!(snap.reports, 0);
}
