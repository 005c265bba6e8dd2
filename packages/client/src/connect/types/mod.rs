//! Connection types and the dial capability
//!
//! - `network`: the `tcp`/`udp` network names a dial call accepts
//! - `connection`: the owned connection returned to callers
//! - `dialer`: the `Dialer` trait and the `DialFn` function type

pub mod connection;
pub mod dialer;
pub mod network;

pub use connection::Connection;
pub use dialer::{DialFn, Dialer, dial_fn};
pub use network::Network;
