//! Configuration file parsing for .vibewall.toml

use crate::catalog::ScenarioConfig;
use crate::paywall::DEFAULT_PAYMENT_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const CONFIG_FILENAME: &str = ".vibewall.toml";

/// Main configuration structure for .vibewall.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VibewallConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub ai: AIConfig,

    #[serde(default)]
    pub paywall: PaywallConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Extra scenarios appended to the built-in catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<ScenarioConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Scenario launched by `vibewall run` when none is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_scenario: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    Openai,
    Anthropic,
}

impl AiProvider {
    /// Environment variables consulted for the credential, in order.
    pub fn key_env_vars(&self) -> &'static [&'static str] {
        match self {
            AiProvider::Gemini => &["GEMINI_API_KEY", "API_KEY"],
            AiProvider::Openai => &["OPENAI_API_KEY", "API_KEY"],
            AiProvider::Anthropic => &["ANTHROPIC_API_KEY", "API_KEY"],
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "gemini-2.5-flash",
            AiProvider::Openai => "gpt-4o-mini",
            AiProvider::Anthropic => "claude-sonnet-4-20250514",
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiProvider::Gemini => write!(f, "gemini"),
            AiProvider::Openai => write!(f, "openai"),
            AiProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIConfig {
    /// Generative backend: "gemini", "openai" or "anthropic"
    #[serde(default)]
    pub provider: AiProvider,

    /// Model name (provider default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// API key — can also be set via GEMINI_API_KEY / API_KEY env var
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override the provider's API root (proxies, tests)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Connect timeout for provider calls in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaywallConfig {
    /// External checkout page opened when the user proceeds to payment
    #[serde(default = "default_payment_url")]
    pub payment_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable color output
    #[serde(default = "default_true")]
    pub color: bool,
}

// Default functions
fn default_timeout() -> u64 {
    10
}

fn default_payment_url() -> String {
    DEFAULT_PAYMENT_URL.to_string()
}

fn default_format() -> String {
    "terminal".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for VibewallConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            ai: AIConfig::default(),
            paywall: PaywallConfig::default(),
            output: OutputConfig::default(),
            scenarios: Vec::new(),
        }
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            model: None,
            api_key: None,
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for PaywallConfig {
    fn default() -> Self {
        Self {
            payment_url: default_payment_url(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: true,
        }
    }
}

impl AIConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Config key first, then the provider's environment variables.
    /// `None` means the provider runs in simulation mode.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        if let Some(key) = &self.api_key {
            if !key.trim().is_empty() {
                return Some(key.trim().to_string());
            }
        }
        self.provider
            .key_env_vars()
            .iter()
            .filter_map(|name| lookup(name))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    }
}

impl VibewallConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        let config: VibewallConfig =
            toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
        Ok(config)
    }

    /// Find and load .vibewall.toml from the given directory or its ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILENAME);
            if config_path.exists() {
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}
