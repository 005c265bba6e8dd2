//! Dialers
//!
//! The direct dialer, the connect-time interface hook and the proxy-selecting
//! dialer the factory hands out.

pub mod direct;
pub mod interface;
pub mod proxy;

pub use direct::DirectDialer;
pub use interface::{ControlHook, InterfaceBinder, PlatformBinder, bind_to_interface};
pub use proxy::{ProxyDialer, Route};
