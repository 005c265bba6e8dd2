//! Configuration validation
//!
//! Checks applied to file-based dial configuration before it is turned into
//! `DialParams`.

use std::net::IpAddr;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid local address: {0}")]
    InvalidAddress(String),

    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    #[error("Invalid interface name: {0}")]
    InvalidInterface(String),

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration validation trait
pub trait ConfigurationValidator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant describing the first invalid field.
    fn validate(&self) -> ConfigResult<()>;
}

/// Longest interface name the kernel accepts (`IFNAMSIZ` minus the NUL).
pub const MAX_INTERFACE_NAME: usize = 15;

const NETWORKS: [&str; 9] = ["tcp", "tcp4", "tcp6", "udp", "udp4", "udp6", "ip", "ip4", "ip6"];

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a local address literal, optionally carrying a `%zone`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidAddress` when the part before the
    /// zone is not an IP address. An empty address is accepted.
    pub fn validate_local_addr(addr: &str) -> ConfigResult<()> {
        if addr.is_empty() {
            return Ok(());
        }
        let ip = addr.split_once('%').map_or(addr, |(ip, _)| ip);
        ip.parse::<IpAddr>()
            .map(|_| ())
            .map_err(|_| ConfigurationError::InvalidAddress(format!("{addr} is not an IP address")))
    }

    /// Validate a network name such as `tcp` or `udp6`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidNetwork` for unknown names.
    pub fn validate_network(network: &str) -> ConfigResult<()> {
        if NETWORKS.contains(&network) {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidNetwork(network.to_owned()))
        }
    }

    /// Validate an interface name. An empty name means no binding.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidInterface` if the name is longer
    /// than 15 bytes or contains `/`, whitespace or NUL.
    pub fn validate_interface(name: &str) -> ConfigResult<()> {
        if name.len() > MAX_INTERFACE_NAME {
            return Err(ConfigurationError::InvalidInterface(format!(
                "{name} exceeds {MAX_INTERFACE_NAME} bytes"
            )));
        }
        if name.chars().any(|c| c == '/' || c == '\0' || c.is_whitespace()) {
            return Err(ConfigurationError::InvalidInterface(format!(
                "{name:?} contains '/', whitespace or NUL"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_addr() {
        assert!(ConfigValidator::validate_local_addr("").is_ok());
        assert!(ConfigValidator::validate_local_addr("10.0.0.2").is_ok());
        assert!(ConfigValidator::validate_local_addr("fe80::1%eth0").is_ok());
        assert!(matches!(
            ConfigValidator::validate_local_addr("example.com"),
            Err(ConfigurationError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_interface_names() {
        assert!(ConfigValidator::validate_interface("").is_ok());
        assert!(ConfigValidator::validate_interface("eth0").is_ok());
        assert!(ConfigValidator::validate_interface("a23456789012345").is_ok());
        assert!(ConfigValidator::validate_interface("a234567890123456").is_err());
        assert!(ConfigValidator::validate_interface("eth/0").is_err());
        assert!(ConfigValidator::validate_interface("eth 0").is_err());
        assert!(ConfigValidator::validate_interface("eth\00").is_err());
    }

    #[test]
    fn test_networks() {
        assert!(ConfigValidator::validate_network("udp6").is_ok());
        assert!(matches!(
            ConfigValidator::validate_network("unix"),
            Err(ConfigurationError::InvalidNetwork(_))
        ));
    }
}
