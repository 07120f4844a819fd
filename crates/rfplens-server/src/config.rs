//! Configuration for the server
//!
//! Bind address, upload limits, and provider endpoints come from a TOML
//! file; provider credentials come from the environment only, so they never
//! land in a config file on disk.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A limit was set to a value that cannot work
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 3001)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Upload bounds
    #[serde(default)]
    pub limits: UploadLimits,

    /// Analysis provider (OpenAI-compatible chat API)
    #[serde(default = "ProviderConfig::openai_default")]
    pub openai: ProviderConfig,

    /// Form-fill provider (Gemini)
    #[serde(default = "ProviderConfig::gemini_default")]
    pub gemini: ProviderConfig,
}

/// Upload boundary conditions, enforced before any pipeline work
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UploadLimits {
    /// Per-file byte cap; files are fully buffered in memory
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,

    /// Files accepted per batch
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

/// Endpoint and model for one provider
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// API base URL
    pub base_url: String,
    /// Model name
    pub model: String,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    3001
}

/// 10 MiB, matching the upload boundary the UI advertises
fn default_max_file_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_files() -> usize {
    10
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            max_files: default_max_files(),
        }
    }
}

impl ProviderConfig {
    fn openai_default() -> Self {
        Self {
            base_url: rfplens_llm::openai::DEFAULT_BASE_URL.to_string(),
            model: rfplens_llm::openai::DEFAULT_MODEL.to_string(),
        }
    }

    fn gemini_default() -> Self {
        Self {
            base_url: rfplens_llm::gemini::DEFAULT_BASE_URL.to_string(),
            model: rfplens_llm::gemini::DEFAULT_MODEL.to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            limits: UploadLimits::default(),
            openai: ProviderConfig::openai_default(),
            gemini: ProviderConfig::gemini_default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_file_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_file_bytes must be greater than 0".to_string(),
            ));
        }
        if self.limits.max_files == 0 {
            return Err(ConfigError::Invalid(
                "max_files must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

/// Provider credentials, read from the environment at startup.
///
/// An absent credential is not an error here: the affected routes answer
/// with a configuration error instead, and the rest keep working.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Analysis provider key
    pub openai_api_key: Option<String>,
    /// Form-fill provider key
    pub gemini_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from `RFPLENS_*`-prefixed variables, falling back
    /// to the conventional unprefixed names.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env_first(&["RFPLENS_OPENAI_API_KEY", "OPENAI_API_KEY"]),
            gemini_api_key: env_first(&["RFPLENS_GEMINI_API_KEY", "GEMINI_API_KEY"]),
        }
    }
}

fn env_first(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr(), "127.0.0.1:3001");
        assert_eq!(config.limits.max_file_bytes, 10 * 1024 * 1024);
        assert_eq!(config.limits.max_files, 10);
    }

    #[test]
    fn test_parse_toml_overrides() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 8080

            [limits]
            max_file_bytes = 1048576
            max_files = 3

            [openai]
            base_url = "http://localhost:8000"
            model = "local-model"
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.limits.max_files, 3);
        assert_eq!(config.openai.model, "local-model");
        // Unspecified sections keep their defaults
        assert_eq!(config.gemini.model, rfplens_llm::gemini::DEFAULT_MODEL);
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let mut config = ServerConfig::default();
        config.limits.max_files = 0;
        assert!(config.validate().is_err());
    }
}
