//! Proxy protocol clients
//!
//! One `Dialer` per proxy protocol family, plus the bypass rules used by the
//! environment fallback.

mod bypass;
mod http_connect;
mod socks;

pub use bypass::{BypassDialer, ProxyBypass};
pub use http_connect::HttpConnectClient;
pub use socks::{DEFAULT_SOCKS_PORT, Socks4Client, Socks5Client};
