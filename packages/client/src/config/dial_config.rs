//! File-based dial configuration
//!
//! A JSON-friendly form of `DialParams` using plain strings and
//! milliseconds, for callers that load settings from disk.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::params::DialParams;
use super::validation::{ConfigResult, ConfigValidator, ConfigurationError, ConfigurationValidator};
use crate::addr::resolve;

fn default_local_network() -> String {
    "tcp".to_string()
}

/// Serializable dial configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialConfig {
    pub urls: String,
    pub local_addr: String,
    pub local_network: String,
    pub interface: String,
    pub timeout_ms: u64,
    pub http_enabled: bool,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            urls: String::new(),
            local_addr: String::new(),
            local_network: default_local_network(),
            interface: String::new(),
            timeout_ms: 0,
            http_enabled: false,
        }
    }
}

impl DialConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::Parse` for malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and convert into `DialParams`.
    ///
    /// The local address goes through the address resolver for
    /// `local_network`, so a `%zone` suffix is preserved.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn into_params(self) -> ConfigResult<DialParams> {
        self.validate()?;
        let local_addr = if self.local_addr.is_empty() {
            None
        } else {
            Some(resolve(&self.local_network, &self.local_addr).ok_or_else(|| {
                ConfigurationError::InvalidAddress(self.local_addr.clone())
            })?)
        };
        Ok(DialParams {
            urls: self.urls,
            local_addr,
            interface: self.interface,
            timeout: Duration::from_millis(self.timeout_ms),
            http_enabled: self.http_enabled,
        })
    }
}

impl ConfigurationValidator for DialConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_network(&self.local_network)?;
        ConfigValidator::validate_local_addr(&self.local_addr)?;
        ConfigValidator::validate_interface(&self.interface)?;
        Ok(())
    }
}
