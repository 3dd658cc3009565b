//! CLI configuration management
//!
//! Handles loading and saving CLI-specific configuration.

use anyhow::{Context, Result};
use kvstore_core::KvError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const ENV_ENDPOINT: &str = "KVSTORE_ENDPOINT";
const ENV_FORMAT: &str = "KVSTORE_FORMAT";
const ENV_VERBOSE: &str = "KVSTORE_VERBOSE";
const ENV_TIMEOUT: &str = "KVSTORE_TIMEOUT";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Store gateway URL
    pub endpoint: String,

    /// Default output format
    pub output_format: String,

    /// Enable verbose logging by default
    pub verbose: bool,

    /// Command timeout in seconds
    pub timeout: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:2379".to_string(),
            output_format: "simple".to_string(),
            verbose: false,
            timeout: 5,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading CLI config from {}", path.display());
            let content =
                std::fs::read_to_string(path).context("Failed to read CLI config file")?;

            toml::from_str(&content).context("Failed to parse CLI config file")
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize CLI config")?;

        std::fs::write(path, content).context("Failed to write CLI config file")?;

        Ok(())
    }

    /// Default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot determine config directory"))?;

        Ok(config_dir.join("kvstore").join("cli.toml"))
    }

    /// Update a single setting by name, validating the new value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "endpoint" => {
                ConfigBuilder::validate_url(value)?;
                self.endpoint = value.to_string();
            }
            "output_format" => {
                ConfigBuilder::validate_output_format(value)?;
                self.output_format = value.to_string();
            }
            "verbose" => self.verbose = parse_bool(value),
            "timeout" => {
                let timeout = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid timeout value. Must be a number"))?;
                ConfigBuilder::validate_timeout(timeout)?;
                self.timeout = timeout;
            }
            _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

fn parse_bool(value: &str) -> bool {
    value.to_lowercase() == "true" || value == "1"
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    endpoint: Option<String>,
    output_format: Option<String>,
    verbose: Option<bool>,
    timeout: Option<u64>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set endpoint (with validation)
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Result<Self, KvError> {
        let url = url.into();
        Self::validate_url(&url)?;
        self.endpoint = Some(url);
        Ok(self)
    }

    /// Set output format (with validation)
    pub fn with_output_format(mut self, format: impl Into<String>) -> Result<Self, KvError> {
        let format = format.into();
        Self::validate_output_format(&format)?;
        self.output_format = Some(format);
        Ok(self)
    }

    /// Set verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Set timeout (with validation)
    pub fn with_timeout(mut self, timeout: u64) -> Result<Self, KvError> {
        Self::validate_timeout(timeout)?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Layer values from the config file at `path`.
    ///
    /// A missing or unreadable file leaves the builder unchanged.
    pub fn with_config_file(self, path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return self;
        };

        match CliConfig::load(path) {
            Ok(config) => Self {
                // Only use file values if they weren't already set (preserving priority)
                endpoint: self.endpoint.or(Some(config.endpoint)),
                output_format: self.output_format.or(Some(config.output_format)),
                verbose: self.verbose.or(Some(config.verbose)),
                timeout: self.timeout.or(Some(config.timeout)),
            },
            Err(e) => {
                debug!("Ignoring config file {}: {:#}", path.display(), e);
                self
            }
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        // Invalid values are skipped so lower-priority sources still apply
        if let Ok(endpoint) = std::env::var(ENV_ENDPOINT) {
            if Self::validate_url(&endpoint).is_ok() {
                self.endpoint = Some(endpoint);
            }
        }

        if let Ok(format) = std::env::var(ENV_FORMAT) {
            if Self::validate_output_format(&format).is_ok() {
                self.output_format = Some(format);
            }
        }

        if let Ok(verbose) = std::env::var(ENV_VERBOSE) {
            self.verbose = Some(parse_bool(&verbose));
        }

        if let Ok(timeout) = std::env::var(ENV_TIMEOUT) {
            if let Ok(timeout) = timeout.parse() {
                if Self::validate_timeout(timeout).is_ok() {
                    self.timeout = Some(timeout);
                }
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig, KvError> {
        let defaults = CliConfig::default();

        let endpoint = self.endpoint.unwrap_or(defaults.endpoint);
        let output_format = self.output_format.unwrap_or(defaults.output_format);
        let timeout = self.timeout.unwrap_or(defaults.timeout);

        // Validate final values
        Self::validate_url(&endpoint)?;
        Self::validate_output_format(&output_format)?;
        Self::validate_timeout(timeout)?;

        Ok(CliConfig {
            endpoint,
            output_format,
            verbose: self.verbose.unwrap_or(defaults.verbose),
            timeout,
        })
    }

    /// Validate URL format
    fn validate_url(url: &str) -> Result<(), KvError> {
        if url.is_empty() {
            return Err(KvError::Config("Endpoint cannot be empty".to_string()));
        }

        // Basic URL validation - must start with http:// or https://
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(KvError::Config(
                "Endpoint must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate output format
    fn validate_output_format(format: &str) -> Result<(), KvError> {
        match format {
            "simple" | "table" | "json" => Ok(()),
            _ => Err(KvError::Config(format!(
                "Invalid output format '{}'. Must be 'simple', 'table' or 'json'",
                format
            ))),
        }
    }

    /// Validate timeout value
    fn validate_timeout(timeout: u64) -> Result<(), KvError> {
        if timeout == 0 {
            return Err(KvError::Config(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if timeout > 300 {
            return Err(KvError::Config(
                "Timeout must be less than or equal to 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}
