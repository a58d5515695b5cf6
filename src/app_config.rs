use anyhow::{anyhow, Context, Result};
use log::{debug, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::extraction::{LlmConfig, RuleConfig};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Rule engine settings
    #[serde(default)]
    pub extraction: RuleConfig,

    /// Language-model path settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Input limits
    #[serde(default)]
    pub input: InputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Language-model provider settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LlmSettings {
    // @field: Model name
    #[serde(default = "default_openai_model")]
    pub model: String,

    // @field: API key, falls back to OPENAI_API_KEY
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Prompt settings
    #[serde(flatten)]
    pub prompt: LlmConfig,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            api_key: String::new(),
            endpoint: default_openai_endpoint(),
            timeout_secs: default_timeout_secs(),
            prompt: LlmConfig::default(),
        }
    }
}

impl LlmSettings {
    /// Configured API key, or the `OPENAI_API_KEY` environment variable
    pub fn get_api_key(&self) -> Option<String> {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.clone());
        }
        std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Limits applied while reading input files
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InputConfig {
    // @field: Per-file size limit in bytes
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    // @field: Timeout for fetching URL input, in seconds
    #[serde(default = "default_url_timeout_secs")]
    pub url_timeout_secs: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            url_timeout_secs: default_url_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "brandspot.json";

fn default_url_timeout_secs() -> u64 {
    crate::web_fetcher::DEFAULT_TIMEOUT_SECS
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_openai_endpoint() -> String {
    crate::providers::openai::DEFAULT_ENDPOINT.to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_file_bytes() -> u64 {
    5 * 1024 * 1024 // 5 MiB
}

impl Config {
    /// Load configuration from `path`, or defaults when the file is missing
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found at '{}', using defaults", path.display());
            return Ok(Self::default());
        }

        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let min = self.extraction.min_certainty;
        if !(0.0..=1.0).contains(&min) {
            return Err(anyhow!("extraction.minCertainty must lie in [0, 1], got {}", min));
        }

        let llm_min = self.llm.prompt.min_certainty;
        if !(0.0..=1.0).contains(&llm_min) {
            return Err(anyhow!("llm.min_certainty must lie in [0, 1], got {}", llm_min));
        }

        if self.input.max_file_bytes == 0 {
            return Err(anyhow!("input.max_file_bytes must be greater than zero"));
        }

        if self.input.url_timeout_secs == 0 {
            return Err(anyhow!("input.url_timeout_secs must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            extraction: RuleConfig::default(),
            llm: LlmSettings::default(),
            input: InputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
