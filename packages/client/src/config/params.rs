//! Dial parameters
//!
//! The immutable record a dial function is built from.

use std::time::Duration;

use crate::addr::ResolvedAddr;

/// Parameters for building a dial function.
///
/// Captured by value for the lifetime of the dial function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialParams {
    /// Comma-separated proxy URLs. Empty means "use the system default".
    pub urls: String,
    /// Local address to bind from; `None` lets the OS choose.
    pub local_addr: Option<ResolvedAddr>,
    /// Interface to bind to; empty means no binding.
    pub interface: String,
    /// Dial timeout; zero means none.
    pub timeout: Duration,
    /// Treat schemes other than SOCKS as HTTP CONNECT proxies.
    pub http_enabled: bool,
}

impl DialParams {
    #[must_use]
    pub fn new(urls: impl Into<String>) -> Self {
        Self {
            urls: urls.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has_proxies(&self) -> bool {
        !self.urls.is_empty()
    }
}
