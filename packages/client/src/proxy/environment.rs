//! System default proxy resolution
//!
//! Used when no explicit proxy list is configured. `ALL_PROXY` may name a
//! SOCKS5 proxy and `NO_PROXY` lists targets that skip it.

use std::env;
use std::sync::Arc;

use url::Url;

use crate::connect::proxy::{BypassDialer, ProxyBypass, Socks5Client};
use crate::connect::service::DirectDialer;
use crate::connect::types::Dialer;
use crate::proxy::url_handling::redact;

/// Produces the dialer used when the proxy list is empty.
pub trait DefaultResolver: Send + Sync {
    fn resolve(&self, direct: Arc<DirectDialer>) -> Arc<dyn Dialer>;
}

/// Resolver driven by `ALL_PROXY` and `NO_PROXY`.
///
/// Only `socks5` and `socks5h` proxies are honoured; any other value falls
/// back to the direct dialer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentResolver {
    all_proxy: Option<String>,
    no_proxy: Option<String>,
}

impl EnvironmentResolver {
    /// Snapshot the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            all_proxy: env_any(&["ALL_PROXY", "all_proxy"]),
            no_proxy: env_any(&["NO_PROXY", "no_proxy"]),
        }
    }

    /// Resolver with explicit values instead of the environment.
    #[must_use]
    pub fn with_values(all_proxy: Option<&str>, no_proxy: Option<&str>) -> Self {
        Self {
            all_proxy: all_proxy.filter(|v| !v.is_empty()).map(str::to_owned),
            no_proxy: no_proxy.filter(|v| !v.is_empty()).map(str::to_owned),
        }
    }

    #[must_use]
    pub fn all_proxy(&self) -> Option<&str> {
        self.all_proxy.as_deref()
    }

    #[must_use]
    pub fn no_proxy(&self) -> Option<&str> {
        self.no_proxy.as_deref()
    }
}

impl DefaultResolver for EnvironmentResolver {
    fn resolve(&self, direct: Arc<DirectDialer>) -> Arc<dyn Dialer> {
        let Some(raw) = self.all_proxy.as_deref() else {
            return direct;
        };
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unparseable ALL_PROXY");
                return direct;
            }
        };
        if !matches!(url.scheme(), "socks5" | "socks5h") {
            tracing::debug!(scheme = url.scheme(), "ignoring ALL_PROXY with unsupported scheme");
            return direct;
        }

        let forward: Arc<dyn Dialer> = direct.clone();
        let proxy: Arc<dyn Dialer> = match Socks5Client::from_url(&url, forward) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unusable ALL_PROXY");
                return direct;
            }
        };
        tracing::debug!(proxy = %redact(&url), "using proxy from environment");

        match self.no_proxy.as_deref().map(ProxyBypass::parse) {
            Some(rules) if !rules.is_empty() => Arc::new(BypassDialer::new(rules, proxy, direct)),
            _ => proxy,
        }
    }
}

fn env_any(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
}
