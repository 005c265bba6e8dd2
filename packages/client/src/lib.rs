//! # Proxy-aware dial functions
//!
//! Builds dial functions that connect either directly or through a proxy
//! picked at random from a configured pool, on every call.
//!
//! ## Features
//!
//! - **SOCKS5/5h** with optional username/password authentication
//! - **SOCKS4/4a** with user id and per-proxy connect timeout
//! - **HTTP CONNECT** tunnels for any other scheme, when enabled
//! - **System default** from `ALL_PROXY`/`NO_PROXY` when no pool is given
//! - **Local address and interface binding** for every outbound socket
//! - **Zone-preserving address resolution** for IPv6 link-local addresses
//!
//! ## Usage
//!
//! ```no_run
//! use std::io::Write;
//! use std::time::Duration;
//!
//! use proxydial_client::{DialParams, build};
//!
//! let dial = build(DialParams {
//!     urls: "socks5://127.0.0.1:1080, socks5://127.0.0.1:1081".to_string(),
//!     timeout: Duration::from_secs(10),
//!     ..DialParams::default()
//! });
//!
//! let mut conn = dial("tcp", "example.com:80")?;
//! conn.write_all(b"HEAD / HTTP/1.0\r\n\r\n")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod addr;
pub mod config;
pub mod connect;
pub mod error;
pub mod proxy;

// Prelude with canonical types
pub mod prelude;

pub use crate::prelude::*;

pub use url::Url;
