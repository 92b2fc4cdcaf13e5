// crates/ticketbridge-core/src/config.rs
// ============================================================================
// Module: Client Configuration
// Description: Configuration loading and validation for the SDK client.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is supplied programmatically or loaded from a TOML file with
//! a strict size limit. Missing or invalid configuration fails closed: the
//! access key must be non-empty, the server URL must parse, and plain HTTP is
//! rejected unless explicitly allowed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default production ticketing endpoint.
pub const DEFAULT_SERVER_URL: &str = "https://api.ticketbridge.io/mcp/ticketing";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;
/// Minimum connect timeout in milliseconds.
pub(crate) const MIN_CONNECT_TIMEOUT_MS: u64 = 100;
/// Maximum connect timeout in milliseconds.
pub(crate) const MAX_CONNECT_TIMEOUT_MS: u64 = 10_000;
/// Minimum request timeout in milliseconds.
pub(crate) const MIN_REQUEST_TIMEOUT_MS: u64 = 500;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Default connect timeout in milliseconds.
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 1_000;
/// Default request timeout in milliseconds.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// SDK client configuration.
///
/// # Invariants
/// - `api_key` is non-empty after [`ClientConfig::validate`] succeeds.
/// - `server_url` parses as a URL with an `http`/`https` scheme.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Remote tool server endpoint.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Access-key credential sent with every request.
    pub api_key: String,
    /// Allow plain `http://` endpoints (local development only).
    #[serde(default)]
    pub allow_insecure_http: bool,
    /// Transport connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Transport request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

/// Returns the default server endpoint.
fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Returns the default connect timeout.
const fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

/// Returns the default request timeout.
const fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

impl ClientConfig {
    /// Builds a configuration with the default endpoint and timeouts.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            server_url: default_server_url(),
            api_key: api_key.into(),
            allow_insecure_http: false,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }

    /// Validates the configuration, failing closed on any violation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the key is empty, the URL is invalid, the
    /// scheme is not allowed, or a timeout is out of bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let url = Url::parse(&self.server_url)
            .map_err(|err| ConfigError::InvalidServerUrl(err.to_string()))?;
        match url.scheme() {
            "https" => {}
            "http" if self.allow_insecure_http => {}
            "http" => return Err(ConfigError::InsecureHttpDisabled),
            other => return Err(ConfigError::InvalidServerUrl(format!(
                "unsupported scheme: {other}"
            ))),
        }
        check_bounds(
            "connect_timeout_ms",
            self.connect_timeout_ms,
            MIN_CONNECT_TIMEOUT_MS,
            MAX_CONNECT_TIMEOUT_MS,
        )?;
        check_bounds(
            "request_timeout_ms",
            self.request_timeout_ms,
            MIN_REQUEST_TIMEOUT_MS,
            MAX_REQUEST_TIMEOUT_MS,
        )?;
        Ok(())
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file with a size cap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is unreadable, oversized, or
    /// fails parsing/validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::FileTooLarge(metadata.len()));
        }
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_toml_str(&text)
    }
}

/// Validates a timeout against its configured bounds.
fn check_bounds(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::TimeoutOutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Access-key credential missing or empty.
    #[error("api_key is required and must be non-empty")]
    MissingApiKey,
    /// Server URL failed to parse or has an unsupported scheme.
    #[error("invalid server_url: {0}")]
    InvalidServerUrl(String),
    /// Plain HTTP endpoint without the insecure override.
    #[error("insecure http endpoint disabled; set allow_insecure_http for local development")]
    InsecureHttpDisabled,
    /// Timeout outside the permitted bounds.
    #[error("{field} must be between {min} and {max} ms, got {value}")]
    TimeoutOutOfRange {
        /// Offending field name.
        field: &'static str,
        /// Provided value.
        value: u64,
        /// Minimum allowed value.
        min: u64,
        /// Maximum allowed value.
        max: u64,
    },
    /// Configuration file exceeds the size cap.
    #[error("config file too large: {0} bytes")]
    FileTooLarge(u64),
    /// Configuration file could not be read.
    #[error("config io failure: {0}")]
    Io(String),
    /// Configuration text failed to parse.
    #[error("config parse failure: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
