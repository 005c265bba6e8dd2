//! Core `DialFactory` struct and collaborator configuration
//!
//! The factory owns the pluggable pieces a dial function is assembled from.
//! Every piece has a platform default, so `DialFactory::new()` is enough for
//! production use; tests swap them for stubs.

use std::fmt;
use std::sync::Arc;

use crate::connect::service::{InterfaceBinder, PlatformBinder};
use crate::proxy::{DefaultResolver, EnvironmentResolver, FastRand, RandomSource};

/// Builder for dial functions
#[derive(Clone)]
pub struct DialFactory {
    pub(super) binder: Arc<dyn InterfaceBinder>,
    pub(super) resolver: Arc<dyn DefaultResolver>,
    pub(super) random: Arc<dyn RandomSource>,
}

impl DialFactory {
    /// Factory with the platform interface binder, the environment proxy
    /// resolver (snapshotted now) and fastrand selection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            binder: Arc::new(PlatformBinder),
            resolver: Arc::new(EnvironmentResolver::from_env()),
            random: Arc::new(FastRand),
        }
    }

    /// Replace the interface binder.
    #[must_use]
    pub fn with_interface_binder(mut self, binder: impl InterfaceBinder + 'static) -> Self {
        self.binder = Arc::new(binder);
        self
    }

    /// Replace the resolver used when the proxy list is empty.
    #[must_use]
    pub fn with_default_resolver(mut self, resolver: impl DefaultResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Replace the source of proxy selection indices.
    #[must_use]
    pub fn with_random_source(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Arc::new(random);
        self
    }
}

impl Default for DialFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DialFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialFactory").finish_non_exhaustive()
    }
}
