//! Configuration management for focustrack
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{FocustrackError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for focustrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timer durations and recording thresholds
    #[serde(default)]
    pub timer: TimerConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Break content API configuration
    #[serde(default)]
    pub content: ContentConfig,
}

/// Timer durations and recording thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Length of a focus session in minutes
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u64,

    /// Length of a short break in minutes
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u64,

    /// Length of a long break in minutes
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u64,

    /// Minimum elapsed seconds before an early-stopped focus session is
    /// recorded as a partial session
    #[serde(default = "default_partial_save_secs")]
    pub partial_save_secs: u64,
}

fn default_focus_minutes() -> u64 {
    25
}

fn default_short_break_minutes() -> u64 {
    5
}

fn default_long_break_minutes() -> u64 {
    15
}

fn default_partial_save_secs() -> u64 {
    60
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            partial_save_secs: default_partial_save_secs(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file path
    ///
    /// When unset the platform data directory is used. The
    /// `FOCUSTRACK_DB` environment variable and the `--storage-path`
    /// CLI flag both take precedence over this value.
    #[serde(default)]
    pub path: Option<String>,
}

/// Break content API configuration
///
/// The endpoints are configurable so tests can point the fetcher at a
/// mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Motivational quote endpoint
    #[serde(default = "default_quote_url")]
    pub quote_url: String,

    /// Advice endpoint, used when the quote endpoint fails
    #[serde(default = "default_advice_url")]
    pub advice_url: String,

    /// Fun fact endpoint
    #[serde(default = "default_fact_url")]
    pub fact_url: String,

    /// Number fact base URL, used when the fact endpoint fails
    #[serde(default = "default_number_fact_url")]
    pub number_fact_url: String,

    /// Timeout for content requests in seconds
    #[serde(default = "default_content_timeout")]
    pub timeout_seconds: u64,
}

fn default_quote_url() -> String {
    "https://api.quotable.io/random?tags=motivational".to_string()
}

fn default_advice_url() -> String {
    "https://api.adviceslip.com/advice".to_string()
}

fn default_fact_url() -> String {
    "https://cat-fact.herokuapp.com/facts/random".to_string()
}

fn default_number_fact_url() -> String {
    "http://numbersapi.com".to_string()
}

fn default_content_timeout() -> u64 {
    10
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            quote_url: default_quote_url(),
            advice_url: default_advice_url(),
            fact_url: default_fact_url(),
            number_fact_url: default_number_fact_url(),
            timeout_seconds: default_content_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from a file with environment and CLI overrides
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `FocustrackError::Config` if the file exists but cannot be
    /// read or parsed.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FocustrackError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| FocustrackError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(minutes) = std::env::var("FOCUSTRACK_FOCUS_MINUTES") {
            if let Ok(value) = minutes.parse() {
                self.timer.focus_minutes = value;
            } else {
                tracing::warn!("Invalid FOCUSTRACK_FOCUS_MINUTES: {}", minutes);
            }
        }

        if let Ok(minutes) = std::env::var("FOCUSTRACK_SHORT_BREAK_MINUTES") {
            if let Ok(value) = minutes.parse() {
                self.timer.short_break_minutes = value;
            } else {
                tracing::warn!("Invalid FOCUSTRACK_SHORT_BREAK_MINUTES: {}", minutes);
            }
        }

        if let Ok(minutes) = std::env::var("FOCUSTRACK_LONG_BREAK_MINUTES") {
            if let Ok(value) = minutes.parse() {
                self.timer.long_break_minutes = value;
            } else {
                tracing::warn!("Invalid FOCUSTRACK_LONG_BREAK_MINUTES: {}", minutes);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `FocustrackError::Config` describing the first invalid
    /// value found.
    pub fn validate(&self) -> Result<()> {
        for (name, minutes) in [
            ("timer.focus_minutes", self.timer.focus_minutes),
            ("timer.short_break_minutes", self.timer.short_break_minutes),
            ("timer.long_break_minutes", self.timer.long_break_minutes),
        ] {
            if minutes == 0 {
                return Err(
                    FocustrackError::Config(format!("{} must be greater than 0", name)).into(),
                );
            }
            if minutes > 480 {
                return Err(FocustrackError::Config(format!(
                    "{} must be less than or equal to 480",
                    name
                ))
                .into());
            }
        }

        if self.timer.partial_save_secs >= self.timer.focus_minutes * 60 {
            return Err(FocustrackError::Config(
                "timer.partial_save_secs must be shorter than the focus session".to_string(),
            )
            .into());
        }

        if self.content.timeout_seconds == 0 {
            return Err(FocustrackError::Config(
                "content.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        for (name, value) in [
            ("content.quote_url", &self.content.quote_url),
            ("content.advice_url", &self.content.advice_url),
            ("content.fact_url", &self.content.fact_url),
            ("content.number_fact_url", &self.content.number_fact_url),
        ] {
            url::Url::parse(value).map_err(|e| {
                FocustrackError::Config(format!("{} is not a valid URL: {}", name, e))
            })?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            storage: StorageConfig::default(),
            content: ContentConfig::default(),
        }
    }
}
