//! Proxy list handling
//!
//! Parsing and random selection over the configured proxy pool, scheme
//! classification, URL helpers and the environment fallback used when no
//! pool is configured.

pub mod environment;
pub mod pool;
pub mod scheme;
pub mod url_handling;

pub use environment::{DefaultResolver, EnvironmentResolver};
pub use pool::{FastRand, ProxyPool, RandomSource, pick};
pub use scheme::ProxyKind;
