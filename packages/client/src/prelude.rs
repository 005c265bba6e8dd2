//! Prelude
//!
//! The types most callers need to build and use a dial function.

// Building dial functions
pub use crate::config::{DialConfig, DialParams};
pub use crate::connect::{DialFactory, build};

// Dialing
pub use crate::connect::{Connection, DialFn, Dialer, DirectDialer, Network, ProxyDialer};

// Address resolution
pub use crate::addr::{ResolvedAddr, resolve};

// Collaborators
pub use crate::connect::{InterfaceBinder, bind_to_interface};
pub use crate::proxy::{DefaultResolver, EnvironmentResolver, RandomSource};

// Error types
pub use crate::error::{DialError, Result};
