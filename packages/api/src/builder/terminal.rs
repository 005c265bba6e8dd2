//! Terminal methods
//!
//! Turn the configured builder into a dial function, a concrete dialer, or a
//! single connection.

use proxydial_client::{Connection, DialFn, Dialer, ProxyDialer, Result};

use crate::builder::core::DialBuilder;

impl DialBuilder {
    /// Build a reusable dial function.
    ///
    /// # Examples
    /// ```no_run
    /// use std::time::Duration;
    /// use proxydial::DialBuilder;
    ///
    /// let dial = DialBuilder::new()
    ///     .proxy("socks5://127.0.0.1:1080")
    ///     .timeout(Duration::from_secs(5))
    ///     .build();
    /// let conn = dial("tcp", "example.com:443");
    /// ```
    #[must_use]
    pub fn build(self) -> DialFn {
        self.dialer().into_fn()
    }

    /// Build the concrete dialer.
    #[must_use]
    pub fn dialer(self) -> ProxyDialer {
        let params = self.params();
        if self.debug_enabled {
            tracing::debug!(
                proxies = self.proxies.len(),
                interface = %params.interface,
                timeout = ?params.timeout,
                http_enabled = params.http_enabled,
                "building dial function"
            );
        }
        self.factory.dialer(params)
    }

    /// Build and dial once.
    ///
    /// # Errors
    ///
    /// Returns the dial failure, see [`proxydial_client::DialError`].
    pub fn dial(self, network: &str, address: &str) -> Result<Connection> {
        self.dialer().dial(network, address)
    }
}
