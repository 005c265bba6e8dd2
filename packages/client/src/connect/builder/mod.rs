//! Dial function factory
//!
//! - [`types`] - `DialFactory` and its injectable collaborators
//! - [`build`] - assembly of the dialer and the free `build` shorthand

pub mod build;
pub mod types;

pub use build::build;
pub use types::DialFactory;
