//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{defaults, markup, output_formats};
use crate::core::error::{HrefsUpError, Result};
use crate::validation::RetryPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-attempt timeout in seconds for HTTP requests
    pub timeout: Option<u64>,

    /// Number of external checks in flight at once
    pub workers: Option<usize>,

    /// Attempts per external reference
    pub retries: Option<u32>,

    /// Base of the exponential backoff between attempts, in seconds
    pub backoff_base: Option<f64>,

    /// Upper bound of the random jitter added to each backoff, in seconds
    pub jitter_max: Option<f64>,

    /// Component whose href attribute is checked
    pub component: Option<String>,

    /// File extensions to scan
    pub file_types: Option<Vec<String>>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Output format (text, json)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(defaults::TIMEOUT_SECONDS),
            workers: Some(defaults::WORKERS),
            retries: Some(defaults::RETRIES),
            backoff_base: Some(defaults::BACKOFF_BASE_SECONDS),
            jitter_max: Some(defaults::JITTER_MAX_SECONDS),
            component: Some(defaults::COMPONENT.to_string()),
            file_types: None,
            user_agent: None,
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            HrefsUpError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            HrefsUpError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Explicit file first (errors propagate), then standard locations.
    pub fn load(config_path: Option<&Path>, no_config: bool) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None if no_config => Ok(Self::default()),
            None => Ok(Self::load_from_standard_locations()),
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(workers) = cli_config.workers {
            self.workers = Some(workers);
        }
        if let Some(retries) = cli_config.retries {
            self.retries = Some(retries);
        }
        if let Some(backoff_base) = cli_config.backoff_base {
            self.backoff_base = Some(backoff_base);
        }
        if let Some(ref component) = cli_config.component {
            self.component = Some(component.clone());
        }
        if let Some(ref file_types) = cli_config.file_types {
            self.file_types = Some(file_types.clone());
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(defaults::TIMEOUT_SECONDS))
    }

    /// Concurrent external checks, never below 1
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or(defaults::WORKERS).max(1)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retries.unwrap_or(defaults::RETRIES),
            backoff_base: seconds(self.backoff_base.unwrap_or(defaults::BACKOFF_BASE_SECONDS)),
            jitter_max: seconds(self.jitter_max.unwrap_or(defaults::JITTER_MAX_SECONDS)),
        }
    }

    pub fn component_name(&self) -> &str {
        self.component.as_deref().unwrap_or(defaults::COMPONENT)
    }

    /// Extensions of files to scan, without leading dots
    pub fn markup_extensions(&self) -> Vec<String> {
        match self.file_types {
            Some(ref types) => types
                .iter()
                .map(|t| t.trim_start_matches('.').to_string())
                .collect(),
            None => markup::SCAN_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION"),
            " (documentation link checker)"
        ))
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(HrefsUpError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > 3600 {
                return Err(HrefsUpError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>1 hour). Consider using a smaller value."
                )));
            }
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(HrefsUpError::Config(
                    "Worker count cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if workers > 1000 {
                return Err(HrefsUpError::Config(format!(
                    "Worker count of {workers} is extremely high. Consider using a smaller value."
                )));
            }
        }

        if let Some(retries) = self.retries
            && !(1..=20).contains(&retries)
        {
            return Err(HrefsUpError::Config(format!(
                "Retries must be between 1 and 20, got {retries}."
            )));
        }

        for (name, value) in [("backoff_base", self.backoff_base), ("jitter_max", self.jitter_max)] {
            if let Some(value) = value
                && !(value.is_finite() && (0.0..=60.0).contains(&value))
            {
                return Err(HrefsUpError::Config(format!(
                    "{name} must be between 0 and 60 seconds, got {value}."
                )));
            }
        }

        if let Some(ref component) = self.component
            && (component.is_empty()
                || !component
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(HrefsUpError::Config(format!(
                "Invalid component name '{component}'. Expected letters, digits, '.', '_' or '-'."
            )));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(HrefsUpError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        Ok(())
    }
}

fn seconds(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f64(value)
    } else {
        Duration::ZERO
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub timeout: Option<u64>,
    pub workers: Option<usize>,
    pub retries: Option<u32>,
    pub backoff_base: Option<f64>,
    pub component: Option<String>,
    pub file_types: Option<Vec<String>>,
    pub user_agent: Option<String>,
    pub output_format: Option<String>,
    pub verbose: bool,
}
