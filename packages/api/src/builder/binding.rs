//! Local binding and timeout configuration

use std::time::Duration;

use proxydial_client::resolve;

use crate::builder::core::DialBuilder;

impl DialBuilder {
    /// Bind outgoing sockets to a local address.
    ///
    /// `network` selects the address kind (`tcp` or `udp`) and must match the
    /// networks later dialed. An IPv6 zone may follow a `%`.
    ///
    /// # Examples
    /// ```no_run
    /// use proxydial::DialBuilder;
    ///
    /// let dial = DialBuilder::new().local_addr("tcp", "fe80::1%2").build();
    /// ```
    #[must_use]
    pub fn local_addr(mut self, network: &str, addr: &str) -> Self {
        self.params.local_addr = resolve(network, addr);
        self
    }

    /// Bind outgoing sockets to a network interface.
    #[must_use]
    pub fn interface(mut self, name: &str) -> Self {
        self.params.interface = name.to_owned();
        self
    }

    /// Dial timeout; zero disables it.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.params.timeout = timeout;
        self
    }
}
