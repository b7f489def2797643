//! Paywall flow: plan selection, checkout, external payment redirect
//!
//! No payment is processed locally. Checkout either hands the configured
//! payment URL to the caller for a redirect or simulates a successful
//! purchase by upgrading the session directly.

use crate::session::Session;

pub const DEFAULT_PAYMENT_URL: &str =
    "https://app.flowglad.com/product/prod_knhGVTPJACzH5y49t1wUc/purchase";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaywallStep {
    #[default]
    Closed,
    Plans,
    Checkout,
}

#[derive(Debug, Clone)]
pub struct Paywall {
    step: PaywallStep,
    processing: bool,
    payment_url: String,
}

impl Paywall {
    pub fn new(payment_url: impl Into<String>) -> Self {
        Self {
            step: PaywallStep::Closed,
            processing: false,
            payment_url: payment_url.into(),
        }
    }

    pub fn step(&self) -> PaywallStep {
        self.step
    }

    pub fn is_open(&self) -> bool {
        self.step != PaywallStep::Closed
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn payment_url(&self) -> &str {
        &self.payment_url
    }

    /// Opens on the plan step. Re-opening an open paywall keeps its step.
    pub fn open(&mut self) {
        if self.step == PaywallStep::Closed {
            self.step = PaywallStep::Plans;
        }
    }

    pub fn close(&mut self) {
        self.step = PaywallStep::Closed;
        self.processing = false;
    }

    pub fn proceed_to_checkout(&mut self) -> bool {
        if self.step == PaywallStep::Plans {
            self.step = PaywallStep::Checkout;
            true
        } else {
            false
        }
    }

    pub fn back_to_plans(&mut self) -> bool {
        if self.step == PaywallStep::Checkout {
            self.step = PaywallStep::Plans;
            true
        } else {
            false
        }
    }

    /// Marks the paywall busy and returns the URL to navigate to. Only
    /// available from the checkout step.
    pub fn redirect_target(&mut self) -> Option<&str> {
        if self.step != PaywallStep::Checkout {
            return None;
        }
        self.processing = true;
        Some(&self.payment_url)
    }

    /// Treats the purchase as paid: upgrades the session and closes.
    pub fn simulate_success(&mut self, session: &mut Session) -> bool {
        if !self.is_open() {
            return false;
        }
        self.processing = true;
        let upgraded = session.upgrade();
        self.close();
        upgraded
    }
}

impl Default for Paywall {
    fn default() -> Self {
        Self::new(DEFAULT_PAYMENT_URL)
    }
}
