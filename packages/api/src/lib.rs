//! Proxydial Public API
//!
//! Fluent construction of proxy-aware dial functions. The returned function
//! is a drop-in replacement for a plain `dial(network, address)` and picks a
//! proxy from the configured pool on every call.

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::DialBuilder;

// Re-export important types from client package
pub use proxydial_client::{
    Connection, DialConfig, DialError, DialFactory, DialFn, DialParams, Dialer, ProxyDialer,
    ResolvedAddr, Result, resolve,
};

/// Main entry point providing static builder methods
pub struct ProxyDial;

impl ProxyDial {
    /// Builder with the default factory.
    #[must_use]
    pub fn builder() -> DialBuilder {
        DialBuilder::new()
    }

    /// Builder with a custom factory.
    #[must_use]
    pub fn with_factory(factory: DialFactory) -> DialBuilder {
        DialBuilder::with_factory(factory)
    }

    /// Dial function for a comma-separated proxy list.
    #[must_use]
    pub fn from_list(urls: &str) -> DialFn {
        DialBuilder::new().proxy_list(urls).build()
    }
}

/// Builder with the default factory.
///
/// Shorthand for `DialBuilder::new()`
#[must_use]
pub fn builder() -> DialBuilder {
    DialBuilder::new()
}

/// Dial function from a validated [`DialConfig`].
///
/// # Errors
///
/// Returns the configuration error when validation fails.
pub fn from_config(
    config: DialConfig,
) -> std::result::Result<DialFn, proxydial_client::config::ConfigurationError> {
    Ok(proxydial_client::build(config.into_params()?))
}
