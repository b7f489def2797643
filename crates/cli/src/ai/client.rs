use reqwest::blocking::Client;
use serde_json::{json, Value};
use vibewall_core::error::{ProviderError, ProviderResult};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

pub struct ApiResponse {
    pub content: String,
    pub input_tokens: usize,
    pub output_tokens: usize,
}

/// What shape of output a call asks the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    /// Any JSON value (item listings)
    Json,
    /// JSON constrained to the report schema where the API supports it
    Report,
}

/// Connection details shared by every call to one provider.
pub struct Endpoint<'a> {
    pub http: &'a Client,
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub model: &'a str,
}

pub fn call_gemini(
    ep: &Endpoint<'_>,
    system: Option<&str>,
    user: &str,
    format: ResponseFormat,
) -> ProviderResult<ApiResponse> {
    let mut body = json!({
        "contents": [{"role": "user", "parts": [{"text": user}]}]
    });
    if let Some(system) = system {
        body["systemInstruction"] = json!({"parts": [{"text": system}]});
    }
    match format {
        ResponseFormat::Text => {}
        ResponseFormat::Json => {
            body["generationConfig"] = json!({"responseMimeType": "application/json"});
        }
        ResponseFormat::Report => {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": report_schema()
            });
        }
    }

    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        ep.base_url.trim_end_matches('/'),
        ep.model
    );
    let resp = ep
        .http
        .post(url)
        .header("x-goog-api-key", ep.api_key)
        .header("content-type", "application/json")
        .json(&body)
        .send()
        .map_err(network)?;

    let json = read_json("Gemini", resp)?;
    let content = json["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();
    let input_tokens = json["usageMetadata"]["promptTokenCount"].as_u64().unwrap_or(0) as usize;
    let output_tokens =
        json["usageMetadata"]["candidatesTokenCount"].as_u64().unwrap_or(0) as usize;

    non_empty(ApiResponse {
        content,
        input_tokens,
        output_tokens,
    })
}

pub fn call_openai(
    ep: &Endpoint<'_>,
    system: Option<&str>,
    user: &str,
    format: ResponseFormat,
) -> ProviderResult<ApiResponse> {
    let mut messages = Vec::new();
    if let Some(system) = system {
        messages.push(json!({"role": "system", "content": system}));
    }
    messages.push(json!({"role": "user", "content": user}));

    let mut body = json!({
        "model": ep.model,
        "messages": messages
    });
    if format != ResponseFormat::Text {
        body["response_format"] = json!({"type": "json_object"});
    }

    let resp = ep
        .http
        .post(format!("{}/v1/chat/completions", ep.base_url.trim_end_matches('/')))
        .header("Authorization", format!("Bearer {}", ep.api_key))
        .header("content-type", "application/json")
        .json(&body)
        .send()
        .map_err(network)?;

    let json = read_json("OpenAI", resp)?;
    let content = json["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string();
    let input_tokens = json["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as usize;
    let output_tokens = json["usage"]["completion_tokens"].as_u64().unwrap_or(0) as usize;

    non_empty(ApiResponse {
        content,
        input_tokens,
        output_tokens,
    })
}

pub fn call_anthropic(
    ep: &Endpoint<'_>,
    system: Option<&str>,
    user: &str,
) -> ProviderResult<ApiResponse> {
    let mut body = json!({
        "model": ep.model,
        "max_tokens": 2048,
        "messages": [{"role": "user", "content": user}]
    });
    if let Some(system) = system {
        body["system"] = json!(system);
    }

    let resp = ep
        .http
        .post(format!("{}/v1/messages", ep.base_url.trim_end_matches('/')))
        .header("x-api-key", ep.api_key)
        .header("anthropic-version", "2023-06-01")
        .header("content-type", "application/json")
        .json(&body)
        .send()
        .map_err(network)?;

    let json = read_json("Anthropic", resp)?;
    let content = json["content"][0]["text"]
        .as_str()
        .unwrap_or("")
        .to_string();
    let input_tokens = json["usage"]["input_tokens"].as_u64().unwrap_or(0) as usize;
    let output_tokens = json["usage"]["output_tokens"].as_u64().unwrap_or(0) as usize;

    non_empty(ApiResponse {
        content,
        input_tokens,
        output_tokens,
    })
}

/// Response schema for structured reports, in Gemini's OpenAPI subset.
pub fn report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A concise executive summary of the analysis (max 3 sentences)."
            },
            "recommendation": {
                "type": "STRING",
                "description": "A specific, actionable next step for the user based on the data."
            },
            "score": {
                "type": "INTEGER",
                "description": "Health/quality score from 0 (bad) to 100 (perfect)."
            },
            "keyMetrics": {
                "type": "ARRAY",
                "description": "3 key metrics extracted from the analysis.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": {"type": "STRING"},
                        "value": {"type": "STRING", "description": "Formatted value (e.g. '$500', '12%')"}
                    }
                }
            },
            "chart": {
                "type": "OBJECT",
                "description": "Data for a visualization relevant to the analysis.",
                "properties": {
                    "title": {"type": "STRING"},
                    "type": {"type": "STRING", "enum": ["line", "bar"]},
                    "labels": {"type": "ARRAY", "items": {"type": "STRING"}},
                    "data": {"type": "ARRAY", "items": {"type": "INTEGER"}}
                }
            }
        },
        "required": ["summary", "recommendation", "score", "keyMetrics", "chart"]
    })
}

fn read_json(provider: &str, resp: reqwest::blocking::Response) -> ProviderResult<Value> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().unwrap_or_default();
        return Err(ProviderError::Http {
            provider: provider.to_string(),
            status,
            body,
        });
    }
    resp.json().map_err(|e| ProviderError::Parse(e.to_string()))
}

fn non_empty(resp: ApiResponse) -> ProviderResult<ApiResponse> {
    if resp.content.trim().is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(resp)
    }
}

fn network(e: reqwest::Error) -> ProviderError {
    ProviderError::Network(e.to_string())
}
