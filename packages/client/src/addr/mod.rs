//! Address handling
//!
//! - `resolve`: textual address plus network name into a typed address
//! - `host_port`: dial target splitting and zoned IPv6 literals

pub mod host_port;
pub mod resolve;

pub use host_port::{join_host_port, split_host_port};
pub use resolve::{IpOnlyAddr, ResolvedAddr, TcpAddr, UdpAddr, resolve};
