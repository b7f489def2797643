//! Progress indicators

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Messages cycled by the loader while a scenario "generates".
const LOADER_PHASES: &[&str] = &[
    "Reading product brief",
    "Designing data model",
    "Wiring entitlement checks",
    "Pricing the Pro plan",
    "Rendering workspace",
];

/// A single pipeline step backed by an indicatif spinner.
///
/// Create with [`Step::new`], then call [`Step::finish`], [`Step::skip`], or
/// [`Step::warn`] when the work completes. On a non-TTY the spinner draws
/// nothing, but the finish/skip lines are still emitted via `eprintln!`.
pub struct Step {
    pb: ProgressBar,
    label: String,
}

impl Step {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("{}...", label));
        pb.enable_steady_tick(Duration::from_millis(80));
        Self { pb, label }
    }

    pub fn update(&self, msg: impl Into<String>) {
        self.pb.set_message(msg.into());
    }

    /// Finish successfully: prints `"  label... done — {summary}"`.
    pub fn finish(&self, summary: &str) {
        self.pb.finish_and_clear();
        eprintln!("  {}... {} — {}", self.label, "done".green(), summary);
    }

    pub fn skip(&self, msg: &str) {
        self.pb.finish_and_clear();
        eprintln!("  {}", msg.dimmed());
    }

    pub fn warn(&self, msg: impl std::fmt::Display) {
        self.pb.println(format!("  {}: {}", "warn".yellow(), msg));
    }
}

/// The "generating your app" loader shown when a scenario launches.
pub fn run_loader(scenario_name: &str, phase_delay: Duration) {
    let step = Step::new(format!("Generating {}", scenario_name));
    for phase in LOADER_PHASES {
        step.update(format!("{}...", phase));
        std::thread::sleep(phase_delay);
    }
    step.finish("workspace ready");
}
