//! Configuration management for the depo application.
//!
//! Settings are stored as JSON in the platform data directory and cover the
//! purely cosmetic and convenience knobs of the tool: how money is rendered
//! and where exports land by default. Business rules never live here.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use depo::libs::config::Config;
//!
//! // Load existing configuration or fall back to defaults
//! let config = Config::read()?;
//! println!("currency: {}", config.currency_symbol());
//!
//! // Run the interactive setup wizard
//! let updated = Config::init()?;
//! updated.save()?;
//! # anyhow::Ok(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Currency symbol used when no configuration exists.
pub const DEFAULT_CURRENCY: &str = "€";

/// Display-related settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Symbol prefixed to money amounts in tables and summaries.
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Export-related settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ExportConfig {
    /// Directory that export files are written to when no explicit output
    /// path is given. Empty means the current working directory.
    pub directory: Option<String>,
}

/// Top-level application configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,
}

impl Config {
    /// Loads the configuration file, falling back to defaults when absent.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME).map_err(|e| anyhow::anyhow!(e.to_string()))?;

        if !config_file_path.exists() {
            msg_debug!(Message::ConfigFileNotFound);
            return Ok(Config::default());
        }

        let file = File::open(&config_file_path)?;
        let config: Config = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Persists the configuration to the platform data directory.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        fs::write(&config_file_path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Interactive setup wizard for the configurable modules.
    ///
    /// Presents a multi-select of modules and prompts only for the chosen
    /// ones, keeping existing values as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Config::read()?;

        let modules = [Message::ConfigModuleDisplay.to_string(), Message::ConfigModuleExport.to_string()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules)
            .interact()?;

        for index in selected {
            match index {
                0 => {
                    let current = config.display.clone().unwrap_or_default();
                    let currency_symbol: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptCurrencySymbol.to_string())
                        .default(current.currency_symbol)
                        .interact_text()?;
                    config.display = Some(DisplayConfig { currency_symbol });
                }
                1 => {
                    let current = config.export.clone().unwrap_or_default();
                    let directory: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptExportDirectory.to_string())
                        .default(current.directory.unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    config.export = Some(ExportConfig {
                        directory: if directory.is_empty() { None } else { Some(directory) },
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Currency symbol for money formatting, defaulting to [`DEFAULT_CURRENCY`].
    pub fn currency_symbol(&self) -> String {
        self.display
            .as_ref()
            .map(|d| d.currency_symbol.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }
}
