//! Dial error handling
//!
//! A single `thiserror` enum covers URL parsing, scheme dispatch, socket setup
//! and protocol handshakes, with an optional proxy context wrapper.

mod classification;
mod constructors;
mod conversions;
pub mod types;

pub use types::{DialError, Result};
