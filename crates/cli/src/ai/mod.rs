use anyhow::Result;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use vibewall_core::config::{AIConfig, AiProvider};
use vibewall_core::error::{ProviderError, ProviderResult};
use vibewall_core::{ContentBackend, ContentProvider, ReportData};

pub mod client;

use client::{ApiResponse, Endpoint, ResponseFormat};

const REPORT_SYSTEM_PROMPT: &str = r#"You are a business intelligence engine that produces data for product dashboards.
Keep every number realistic and grounded:
1. No inflated figures. ROI stays within 5-300%, vulnerability counts within 0-20, scores within 0-100.
2. Chart data must agree with the summary.
3. "recommendation" is one specific next step (e.g. "Upgrade dependency X", "Raise the bid on keyword Y").
4. "keyMetrics" values are formatted strings such as "$1,204" or "14.5%".
5. "chart.data" is an array of integers and "chart.labels" has the same length."#;

/// Appended for providers without native schema support.
const REPORT_SHAPE_HINT: &str = r#"
Respond with a single JSON object with exactly these keys:
{"summary": string, "recommendation": string, "score": integer 0-100,
 "keyMetrics": [{"label": string, "value": string}] (3 entries),
 "chart": {"title": string, "type": "line" | "bar", "labels": [string], "data": [integer]}}
Output only the JSON object. No markdown fences, no extra text."#;

const ITEMS_SUFFIX: &str = " Return ONLY a JSON array of strings.";

/// [`ContentBackend`] over a hosted model API.
pub struct LlmBackend {
    provider: AiProvider,
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
}

impl LlmBackend {
    pub fn new(config: &AIConfig, api_key: String) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(config.provider).to_string());
        Ok(Self {
            provider: config.provider,
            model: config.model().to_string(),
            api_key,
            base_url,
            http,
        })
    }

    fn call(&self, system: Option<&str>, user: &str, format: ResponseFormat) -> ProviderResult<ApiResponse> {
        let ep = Endpoint {
            http: &self.http,
            base_url: &self.base_url,
            api_key: &self.api_key,
            model: &self.model,
        };
        let resp = match self.provider {
            AiProvider::Gemini => client::call_gemini(&ep, system, user, format),
            AiProvider::Openai => client::call_openai(&ep, system, user, format),
            AiProvider::Anthropic => client::call_anthropic(&ep, system, user),
        }?;
        debug!(
            provider = %self.provider,
            model = %self.model,
            input_tokens = resp.input_tokens,
            output_tokens = resp.output_tokens,
            "model call complete"
        );
        Ok(resp)
    }
}

impl ContentBackend for LlmBackend {
    fn name(&self) -> &str {
        match self.provider {
            AiProvider::Gemini => "gemini",
            AiProvider::Openai => "openai",
            AiProvider::Anthropic => "anthropic",
        }
    }

    fn complete(&self, prompt: &str) -> ProviderResult<String> {
        Ok(self.call(None, prompt, ResponseFormat::Text)?.content)
    }

    fn list_items(&self, prompt: &str) -> ProviderResult<Vec<String>> {
        let full = format!("{}{}", prompt, ITEMS_SUFFIX);
        let resp = self.call(None, &full, ResponseFormat::Json)?;
        parse_items(&resp.content)
    }

    fn analyze(&self, prompt: &str) -> ProviderResult<ReportData> {
        let resp = match self.provider {
            AiProvider::Gemini => self.call(Some(REPORT_SYSTEM_PROMPT), prompt, ResponseFormat::Report)?,
            _ => {
                let system = format!("{}\n{}", REPORT_SYSTEM_PROMPT, REPORT_SHAPE_HINT);
                self.call(Some(&system), prompt, ResponseFormat::Report)?
            }
        };
        parse_report(&resp.content)
    }

    fn chat(&self, system: &str, question: &str) -> ProviderResult<String> {
        Ok(self.call(Some(system), question, ResponseFormat::Text)?.content)
    }
}

pub fn default_base_url(provider: AiProvider) -> &'static str {
    match provider {
        AiProvider::Gemini => client::GEMINI_BASE_URL,
        AiProvider::Openai => client::OPENAI_BASE_URL,
        AiProvider::Anthropic => client::ANTHROPIC_BASE_URL,
    }
}

/// Builds the content provider for this run. No credential, or
/// `force_simulation`, yields simulation mode.
pub fn build_provider(config: &AIConfig, force_simulation: bool) -> Result<ContentProvider> {
    if force_simulation {
        return Ok(ContentProvider::simulated());
    }
    match config.resolve_api_key() {
        Some(key) => Ok(ContentProvider::new(Box::new(LlmBackend::new(config, key)?))),
        None => Ok(ContentProvider::simulated()),
    }
}

/// Strips markdown code fences models like to wrap JSON in.
pub fn strip_fences(content: &str) -> &str {
    content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

pub fn parse_items(content: &str) -> ProviderResult<Vec<String>> {
    let json_str = strip_fences(content);

    if let Ok(items) = serde_json::from_str::<Vec<String>>(json_str) {
        return Ok(items);
    }

    // Some models (and OpenAI's JSON mode) wrap the array in an object
    let obj: Value = serde_json::from_str(json_str)?;
    for key in ["items", "names", "results", "data"] {
        if let Some(arr) = obj.get(key) {
            if let Ok(items) = serde_json::from_value::<Vec<String>>(arr.clone()) {
                return Ok(items);
            }
        }
    }
    if let Some(map) = obj.as_object() {
        if map.len() == 1 {
            if let Some(Ok(items)) = map
                .values()
                .next()
                .map(|v| serde_json::from_value::<Vec<String>>(v.clone()))
            {
                return Ok(items);
            }
        }
    }

    Err(ProviderError::Parse(
        "expected a JSON array of strings".to_string(),
    ))
}

pub fn parse_report(content: &str) -> ProviderResult<ReportData> {
    let report = serde_json::from_str::<ReportData>(strip_fences(content))?;
    Ok(report)
}
