//! TCP/UDP connection utilities
//!
//! Target resolution, socket setup with the connect-time hook, and the proxy
//! handshakes (SOCKS4/4a, SOCKS5, HTTP CONNECT) that run over an established stream.

pub mod basic_connection;
pub mod dns_resolution;
pub mod http_connect;
pub mod socks_protocol;

pub use basic_connection::{LocalBind, connect_to_address_list};
pub use dns_resolution::{resolve_host_sync, resolve_target};
pub use http_connect::establish_connect_tunnel;
pub use socks_protocol::{SocksCredentials, Socks4Target, socks4_handshake, socks5_handshake};
