//! The dial capability shared by the direct dialer, every proxy client and
//! the factory product

use std::sync::Arc;

use super::connection::Connection;
use crate::error::Result;

/// Anything that can turn `(network, address)` into an established connection.
///
/// Implementations are shared across threads and must not need external locking.
pub trait Dialer: Send + Sync {
    /// Connect to `address` (`host:port`) over `network` (`tcp`, `udp4`, ...).
    ///
    /// # Errors
    ///
    /// Returns a [`crate::DialError`] when the network is unknown, the address
    /// does not resolve, or the connection or proxy handshake fails. No
    /// connection is retained on error.
    fn dial(&self, network: &str, address: &str) -> Result<Connection>;
}

impl<D: Dialer + ?Sized> Dialer for Arc<D> {
    fn dial(&self, network: &str, address: &str) -> Result<Connection> {
        (**self).dial(network, address)
    }
}

impl<D: Dialer + ?Sized> Dialer for Box<D> {
    fn dial(&self, network: &str, address: &str) -> Result<Connection> {
        (**self).dial(network, address)
    }
}

/// First-class dial function, interchangeable with any `Fn(network, address)`.
pub type DialFn = Arc<dyn Fn(&str, &str) -> Result<Connection> + Send + Sync>;

/// Turn a dialer into a [`DialFn`].
pub fn dial_fn<D: Dialer + 'static>(dialer: D) -> DialFn {
    Arc::new(move |network: &str, address: &str| dialer.dial(network, address))
}
