//! Connection establishment
//!
//! - [`types`] - networks, connections and the `Dialer` capability
//! - [`tcp`] - target resolution, socket setup and proxy handshakes
//! - [`proxy`] - one client per proxy protocol, plus bypass rules
//! - [`service`] - the direct and proxy-selecting dialers
//! - [`builder`] - the factory producing dial functions

pub mod builder;
pub mod proxy;
pub mod service;
pub mod tcp;
pub mod types;

pub use builder::{DialFactory, build};
pub use proxy::{BypassDialer, HttpConnectClient, ProxyBypass, Socks4Client, Socks5Client};
pub use service::{
    ControlHook, DirectDialer, InterfaceBinder, PlatformBinder, ProxyDialer, Route, bind_to_interface,
};
pub use types::{Connection, DialFn, Dialer, Network, dial_fn};
