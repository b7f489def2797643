//! CLI commands

pub mod analyze;
pub mod ask;
pub mod init;
pub mod run;
pub mod scenarios;

use anyhow::Result;
use std::path::Path;
use vibewall_core::{Catalog, ContentProvider, Paywall, ScenarioConfig, VibewallConfig};

use crate::{ai, Cli, OutputFormat};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown scenario '{id}'. Available: {available}")]
    UnknownScenario { id: String, available: String },
    #[error("No scenarios configured")]
    EmptyCatalog,
}

/// Everything a command needs: config, catalog and output format.
pub struct Context {
    pub config: VibewallConfig,
    pub catalog: Catalog,
    pub format: OutputFormat,
    pub simulate: bool,
}

impl Context {
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
        let config = VibewallConfig::find_and_load(&cwd)?;
        Ok(Self::from_config(config, cli))
    }

    pub fn from_config(config: VibewallConfig, cli: &Cli) -> Self {
        if !config.output.color {
            colored::control::set_override(false);
        }
        let catalog = Catalog::builtin().with_extra(config.scenarios.clone());
        let format = cli
            .format
            .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));
        Self {
            config,
            catalog,
            format,
            simulate: cli.simulate,
        }
    }

    pub fn scenario(&self, id: &str) -> Result<ScenarioConfig, CommandError> {
        find_scenario(&self.catalog, id)
    }

    pub fn provider(&self) -> Result<ContentProvider> {
        ai::build_provider(&self.config.ai, self.simulate)
    }

    pub fn paywall(&self) -> Paywall {
        Paywall::new(self.config.paywall.payment_url.clone())
    }
}

pub fn find_scenario(catalog: &Catalog, id: &str) -> Result<ScenarioConfig, CommandError> {
    catalog
        .get(id)
        .cloned()
        .ok_or_else(|| CommandError::UnknownScenario {
            id: id.to_string(),
            available: catalog.ids().join(", "),
        })
}
