use vibewall_core::paywall::DEFAULT_PAYMENT_URL;
use vibewall_core::{Catalog, Paywall, PaywallStep, Session, Tier};

fn session() -> Session {
    Session::with_scenario(Catalog::builtin().get("code-guardian").unwrap().clone())
}

#[test]
fn starts_closed_with_default_url() {
    let paywall = Paywall::default();
    assert_eq!(paywall.step(), PaywallStep::Closed);
    assert!(!paywall.is_open());
    assert!(!paywall.is_processing());
    assert_eq!(paywall.payment_url(), DEFAULT_PAYMENT_URL);
}

#[test]
fn plan_to_checkout_and_back() {
    let mut paywall = Paywall::default();
    assert!(!paywall.proceed_to_checkout());

    paywall.open();
    assert_eq!(paywall.step(), PaywallStep::Plans);
    assert!(!paywall.back_to_plans());
    assert!(paywall.proceed_to_checkout());
    assert_eq!(paywall.step(), PaywallStep::Checkout);

    // Opening again keeps the current step
    paywall.open();
    assert_eq!(paywall.step(), PaywallStep::Checkout);

    assert!(paywall.back_to_plans());
    assert_eq!(paywall.step(), PaywallStep::Plans);
}

#[test]
fn redirect_only_from_checkout() {
    let mut paywall = Paywall::new("https://pay.example.test/checkout");
    paywall.open();
    assert!(paywall.redirect_target().is_none());
    assert!(!paywall.is_processing());

    paywall.proceed_to_checkout();
    assert_eq!(
        paywall.redirect_target(),
        Some("https://pay.example.test/checkout")
    );
    assert!(paywall.is_processing());

    paywall.close();
    assert!(!paywall.is_open());
    assert!(!paywall.is_processing());
}

#[test]
fn simulated_success_upgrades_and_closes() {
    let mut session = session();
    let mut paywall = Paywall::default();
    paywall.open();
    paywall.proceed_to_checkout();

    assert!(paywall.simulate_success(&mut session));
    assert_eq!(session.state().tier, Tier::Pro);
    assert_eq!(session.state().wallet_balance, 29.0);
    assert!(!paywall.is_open());
    assert!(!paywall.is_processing());
}

#[test]
fn simulated_success_from_plan_step() {
    let mut session = session();
    let mut paywall = Paywall::default();
    paywall.open();
    assert!(paywall.simulate_success(&mut session));
    assert_eq!(session.state().tier, Tier::Pro);
}

#[test]
fn simulated_success_requires_open_paywall() {
    let mut session = session();
    let mut paywall = Paywall::default();
    assert!(!paywall.simulate_success(&mut session));
    assert_eq!(session.state().tier, Tier::Free);
    assert_eq!(session.state().wallet_balance, 0.0);
}

#[test]
fn simulated_success_without_scenario_closes_but_does_not_upgrade() {
    let mut session = Session::new();
    let mut paywall = Paywall::default();
    paywall.open();
    assert!(!paywall.simulate_success(&mut session));
    assert!(!paywall.is_open());
}
