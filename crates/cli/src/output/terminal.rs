//! Terminal output formatting

use colored::{Color, Colorize};
use vibewall_core::catalog::{PlanLimit, ScenarioConfig, Theme};
use vibewall_core::entitlement::UsageMeter;
use vibewall_core::insight::{AdminSnapshot, Insight};
use vibewall_core::report::{ChartKind, ScoreStatus};
use vibewall_core::{AnalysisResult, Paywall, PaywallStep, Tier};

const SPARK_LEVELS: &[char] = &['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const METER_WIDTH: usize = 20;
const BAR_CHART_WIDTH: usize = 30;

pub fn theme_color(theme: Theme) -> Color {
    match theme {
        Theme::Indigo => Color::Blue,
        Theme::Emerald => Color::Green,
        Theme::Blue => Color::BrightBlue,
        Theme::Purple => Color::Magenta,
        Theme::Rose => Color::Red,
        Theme::Amber => Color::Yellow,
    }
}

pub fn status_color(status: ScoreStatus) -> Color {
    match status {
        ScoreStatus::Excellent => Color::Green,
        ScoreStatus::Good => Color::Blue,
        ScoreStatus::Fair => Color::Yellow,
        ScoreStatus::Critical => Color::Red,
    }
}

fn insight_color(insight: Insight) -> Color {
    match insight {
        Insight::Monitoring => Color::Blue,
        Insight::HighEngagement => Color::Yellow,
        Insight::PaywallHit => Color::Red,
        Insight::ActiveSubscriber => Color::Green,
        Insight::WhaleUser => Color::Magenta,
    }
}

/// Horizontal fill bar; `percent` is clamped to 0..=100.
pub fn meter_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn sparkline(data: &[i64]) -> String {
    let (Some(min), Some(max)) = (data.iter().min(), data.iter().max()) else {
        return String::new();
    };
    // Widened so extreme model values cannot overflow
    let (min, max) = (*min as i128, *max as i128);
    let span = (max - min).max(1) as f64;
    data.iter()
        .map(|v| {
            let idx = (((*v as i128 - min) as f64 / span) * (SPARK_LEVELS.len() - 1) as f64).round();
            SPARK_LEVELS[idx as usize]
        })
        .collect()
}

pub fn bar_chart(labels: &[String], data: &[i64]) -> Vec<String> {
    let max = data.iter().copied().max().unwrap_or(0).max(1);
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    data.iter()
        .enumerate()
        .map(|(i, v)| {
            let label = labels.get(i).map(String::as_str).unwrap_or("");
            let len = ((*v).max(0) as f64 / max as f64 * BAR_CHART_WIDTH as f64).round() as usize;
            format!("{:>w$} │{} {}", label, "■".repeat(len), v, w = label_width)
        })
        .collect()
}

pub fn format_scenario_card(index: usize, scenario: &ScenarioConfig) -> String {
    let plan = &scenario.pro_plan;
    let accent = theme_color(scenario.theme);
    let limit = match plan.limit {
        PlanLimit::Limited(n) => format!("{} {}s", n, scenario.action_name.to_lowercase()),
        PlanLimit::Unlimited => "unlimited".to_string(),
    };
    let mut out = format!(
        "  {}. {} {}  {}\n",
        index,
        scenario.icon.glyph(),
        scenario.name.bold().color(accent),
        format!("[{}]", scenario.id).dimmed()
    );
    out.push_str(&format!("     {}\n", scenario.description));
    out.push_str(&format!(
        "     Free: {} {}s   {}: {}/{} ({})\n",
        scenario.free_limit,
        scenario.action_name.to_lowercase(),
        plan.name,
        format!("${}", plan.price).bold(),
        plan.interval.short(),
        limit
    ));
    out
}

pub fn format_usage_header(scenario: &ScenarioConfig, meter: &UsageMeter, tier: Tier, wallet: f64) -> String {
    let accent = if meter.locked { Color::Red } else { theme_color(scenario.theme) };
    let mut out = format!(
        "  {} {}   {}  {} / {} used  {}",
        scenario.icon.glyph(),
        scenario.name.bold(),
        meter.plan_label,
        meter.used,
        meter.limit,
        meter_bar(meter.percent, METER_WIDTH).color(accent)
    );
    if wallet > 0.0 {
        out.push_str(&format!("  {}", format!("Spend: ${:.2}", wallet).green().bold()));
    }
    match tier {
        Tier::Pro => out.push_str(&format!("  {}", "PRO ACTIVE".green().bold())),
        Tier::Free if meter.locked => out.push_str(&format!("  {}", "LOCKED".red().bold())),
        Tier::Free => {}
    }
    out
}

pub fn format_item_list(scenario: &ScenarioConfig, items: &[String], processed: impl Fn(&str) -> bool) -> String {
    let mut out = format!(
        "  {}\n",
        format!("Available {}s", scenario.item_name).to_uppercase().dimmed()
    );
    for (i, item) in items.iter().enumerate() {
        let marker = if processed(item) {
            format!("{} Processed", "\u{2713}".green())
        } else {
            format!("{}", scenario.action_name.color(theme_color(scenario.theme)))
        };
        out.push_str(&format!("  {:>2}. {:<40} {}\n", i + 1, item, marker));
    }
    out
}

pub fn format_report(result: &AnalysisResult, theme: Theme) -> String {
    let report = &result.report_data;
    let status = report.status();
    let color = status_color(status);
    let accent = theme_color(theme);

    let mut out = String::new();
    out.push_str(&format!(
        "  {} {}  {} {}\n",
        "GENERATED REPORT".dimmed(),
        result.item_name.bold(),
        status.label().color(color).bold(),
        report.score.to_string().color(color).bold()
    ));
    out.push_str(&format!("  {}\n", result.id.dimmed()));
    out.push_str(&format!(
        "  Score     {} {}/100\n",
        meter_bar(report.score as f64, METER_WIDTH).color(color),
        report.score
    ));
    out.push_str(&format!("  {}\n  {}\n", "Executive Summary".bold(), report.summary));
    out.push_str(&format!(
        "  {}\n  {}\n",
        "Recommendation".bold().color(accent),
        report.recommendation
    ));
    if !report.key_metrics.is_empty() {
        let metrics: Vec<String> = report
            .key_metrics
            .iter()
            .map(|m| format!("{}: {}", m.label.dimmed(), m.value.to_string().bold()))
            .collect();
        out.push_str(&format!("  {}\n", metrics.join("   ")));
    }
    out.push_str(&format!("  {}\n", report.chart.title.bold()));
    match report.chart.kind {
        ChartKind::Bar => {
            for line in bar_chart(&report.chart.labels, &report.chart.data) {
                out.push_str(&format!("    {}\n", line.color(accent)));
            }
        }
        ChartKind::Line => {
            out.push_str(&format!(
                "    {}  {}\n",
                sparkline(&report.chart.data).color(accent),
                report.chart.labels.join(" ").dimmed()
            ));
        }
    }
    out
}

pub fn format_paywall(paywall: &Paywall, scenario: &ScenarioConfig) -> String {
    let plan = &scenario.pro_plan;
    let mut out = format!(
        "  {} Unlock the full power of {}. Secure checkout handled externally.\n",
        "\u{26a1}".yellow(),
        scenario.name.bold()
    );
    match paywall.step() {
        PaywallStep::Closed => {}
        PaywallStep::Plans => {
            out.push_str(&format!(
                "  {}  ${}/{}\n  {}\n",
                plan.name.bold(),
                plan.price,
                plan.interval.short(),
                plan.description
            ));
            out.push_str(&format!(
                "  Run '{}' to continue, or '{}' to dismiss.\n",
                "checkout".bold(),
                "close".bold()
            ));
        }
        PaywallStep::Checkout => {
            out.push_str(&format!(
                "  Checkout: {} — ${}\n",
                plan.name.bold(),
                plan.price
            ));
            out.push_str(&format!(
                "  '{}' opens {}\n  '{}' simulates a successful payment, '{}' returns to plans.\n",
                "pay".bold(),
                paywall.payment_url().underline(),
                "simulate".bold(),
                "back".bold()
            ));
        }
    }
    out
}

pub fn format_admin(snapshot: &AdminSnapshot, scenario: &ScenarioConfig, user_id: &str) -> String {
    let color = insight_color(snapshot.insight);
    let mut out = format!(
        "  {}\n  Context: {} | User ID: {}\n\n",
        "Live Customer Intelligence".bold(),
        scenario.name.bold(),
        user_id.dimmed()
    );
    out.push_str(&format!(
        "  {} {} — {}\n",
        "\u{25cf}".color(color),
        snapshot.insight.title().color(color).bold(),
        snapshot.insight.description()
    ));
    out.push_str(&format!(
        "  Conversion probability  {}%\n",
        snapshot.conversion_probability
    ));
    out.push_str(&format!(
        "  Usage     {} / {}  {} {:.0}%\n",
        snapshot.usage,
        snapshot.limit,
        meter_bar(snapshot.usage_percent, METER_WIDTH).color(color),
        snapshot.usage_percent.min(100.0)
    ));
    out.push_str(&format!(
        "  Revenue   {}\n",
        format!("${:.2}", snapshot.revenue).green().bold()
    ));
    out.push_str(&format!(
        "  Plan      {}   Current charge: {}\n",
        snapshot.tier, snapshot.current_charge
    ));
    out.push_str(&format!(
        "  Reports   {}   Score trend {}  {}\n",
        snapshot.reports,
        sparkline(&snapshot.score_trend),
        snapshot.trend_labels.join(" ").dimmed()
    ));
    out
}
