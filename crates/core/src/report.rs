//! Structured report produced by the content provider for each metered action

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Chart {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: Vec<i64>,
}

/// Metric values come back either pre-formatted ("$1,204") or as bare numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetric {
    pub label: String,
    pub value: MetricValue,
}

impl KeyMetric {
    pub fn new(label: &str, value: impl Into<MetricValue>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub summary: String,
    pub recommendation: String,
    /// 0-100 by contract with the model; not enforced
    pub score: i64,
    #[serde(default)]
    pub key_metrics: Vec<KeyMetric>,
    #[serde(default)]
    pub chart: Chart,
}

impl ReportData {
    /// Canned report returned when no credential is configured.
    pub fn simulated() -> Self {
        Self {
            summary: "Simulation Mode: API Key missing. This is a simulated report summary."
                .to_string(),
            recommendation: "Please provide a valid API key to generate real insights."
                .to_string(),
            score: 85,
            key_metrics: vec![
                KeyMetric::new("Metric A", "92%"),
                KeyMetric::new("Metric B", "Low Risk"),
                KeyMetric::new("Metric C", "$1.2k"),
            ],
            chart: Chart {
                title: "Trend Analysis".to_string(),
                kind: ChartKind::Line,
                labels: ["Jan", "Feb", "Mar", "Apr", "May"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                data: vec![45, 52, 49, 62, 85],
            },
        }
    }

    /// Placeholder shown when the provider call or its parsing fails.
    pub fn failed() -> Self {
        Self {
            summary: "Error generating report. Please try again.".to_string(),
            recommendation: "Retry the analysis.".to_string(),
            score: 0,
            key_metrics: Vec::new(),
            chart: Chart {
                title: "Error".to_string(),
                kind: ChartKind::Bar,
                labels: Vec::new(),
                data: Vec::new(),
            },
        }
    }

    pub fn status(&self) -> ScoreStatus {
        ScoreStatus::from_score(self.score)
    }
}

/// Display band for a report score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStatus {
    Excellent,
    Good,
    Fair,
    Critical,
}

impl ScoreStatus {
    pub fn from_score(score: i64) -> Self {
        if score >= 80 {
            ScoreStatus::Excellent
        } else if score >= 60 {
            ScoreStatus::Good
        } else if score >= 40 {
            ScoreStatus::Fair
        } else {
            ScoreStatus::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreStatus::Excellent => "EXCELLENT",
            ScoreStatus::Good => "GOOD",
            ScoreStatus::Fair => "FAIR",
            ScoreStatus::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
