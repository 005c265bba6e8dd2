//! Dial configuration
//!
//! `DialParams` is what the factory consumes; `DialConfig` is its
//! serializable, validated counterpart.

pub mod dial_config;
pub mod params;
pub mod validation;

pub use dial_config::DialConfig;
pub use params::DialParams;
pub use validation::{ConfigResult, ConfigValidator, ConfigurationError, ConfigurationValidator};
