//! Dial builder API modules
//!
//! Fluent configuration of proxy pool, credentials, local binding and
//! timeout, ending in a dial function.

pub mod auth;
pub mod binding;
pub mod core;
pub mod proxies;
pub mod terminal;

pub use core::DialBuilder;
