//! Core `DialBuilder` structure and base functionality
//!
//! Holds the factory and the parameters being assembled. Proxy entries are
//! collected as a list and joined into the comma-separated form only when
//! the dial function is built.

use std::fmt;

use proxydial_client::{DialFactory, DialParams};

/// Fluent builder for dial functions
#[derive(Clone)]
pub struct DialBuilder {
    /// Factory the dial function is built with
    pub(crate) factory: DialFactory,
    /// Proxy URLs in insertion order
    pub(crate) proxies: Vec<String>,
    /// Everything except the proxy list
    pub(crate) params: DialParams,
    /// Debug logging enabled flag
    pub(crate) debug_enabled: bool,
}

impl DialBuilder {
    /// Start with the default factory and no proxies.
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(DialFactory::new())
    }

    /// Start with a custom factory, for example one with stub collaborators.
    #[must_use]
    pub fn with_factory(factory: DialFactory) -> Self {
        Self {
            factory,
            proxies: Vec::new(),
            params: DialParams::default(),
            debug_enabled: false,
        }
    }

    /// Log the assembled parameters when the dial function is built.
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// The parameters this builder would build with.
    #[must_use]
    pub fn params(&self) -> DialParams {
        DialParams {
            urls: self.proxies.join(","),
            ..self.params.clone()
        }
    }
}

impl Default for DialBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DialBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialBuilder")
            .field("proxies", &self.proxies.len())
            .field("local_addr", &self.params.local_addr)
            .field("interface", &self.params.interface)
            .field("timeout", &self.params.timeout)
            .field("http_enabled", &self.params.http_enabled)
            .finish_non_exhaustive()
    }
}
