//! Proxy selection and protocol dispatch
//!
//! Each dial picks one entry of the proxy pool at random, parses it and hands
//! the target to the client for its scheme. With no pool configured every
//! dial goes to the system default dialer instead.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use super::direct::DirectDialer;
use crate::connect::proxy::{HttpConnectClient, Socks4Client, Socks5Client};
use crate::connect::types::{Connection, DialFn, Dialer, dial_fn};
use crate::error::{DialError, Result};
use crate::proxy::url_handling::redact;
use crate::proxy::{ProxyKind, ProxyPool, RandomSource, pick};

/// Where a dial goes.
#[derive(Clone)]
pub enum Route {
    /// No proxy list: everything goes to the resolved default dialer.
    PassThrough(Arc<dyn Dialer>),
    /// Pick a proxy from the pool on each call.
    Pool(ProxyPool),
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough(_) => f.write_str("PassThrough"),
            Self::Pool(pool) => f.debug_tuple("Pool").field(&pool.len()).finish(),
        }
    }
}

/// Dialer produced by the factory.
///
/// Read-only after construction; concurrent dials share nothing mutable.
#[derive(Clone)]
pub struct ProxyDialer {
    direct: Arc<DirectDialer>,
    route: Route,
    timeout: Duration,
    http_enabled: bool,
    random: Arc<dyn RandomSource>,
}

impl ProxyDialer {
    #[must_use]
    pub fn new(
        direct: Arc<DirectDialer>,
        route: Route,
        timeout: Duration,
        http_enabled: bool,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            direct,
            route,
            timeout,
            http_enabled,
            random,
        }
    }

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub fn direct(&self) -> &Arc<DirectDialer> {
        &self.direct
    }

    /// Wrap into a first-class dial function.
    #[must_use]
    pub fn into_fn(self) -> DialFn {
        dial_fn(self)
    }

    fn dial_via(&self, raw: &str, network: &str, address: &str) -> Result<Connection> {
        let url = Url::parse(raw).map_err(|source| DialError::MalformedProxyUrl {
            url: raw.to_owned(),
            source,
        })?;
        let kind = ProxyKind::from_scheme(url.scheme());
        tracing::debug!(proxy = %redact(&url), ?kind, target = address, "selected proxy");

        let result = match kind {
            ProxyKind::Socks5 => {
                let forward: Arc<dyn Dialer> = self.direct.clone();
                Socks5Client::from_url(&url, forward).and_then(|c| c.dial(network, address))
            }
            ProxyKind::Socks4 => Socks4Client::from_url(raw).and_then(|c| c.dial(network, address)),
            ProxyKind::Other if self.http_enabled => HttpConnectClient::from_url(&url, self.timeout)
                .and_then(|c| c.dial(network, address)),
            ProxyKind::Other => return Err(DialError::UnsupportedScheme(url.scheme().to_owned())),
        };
        result.map_err(|e| e.with_proxy(redact(&url)))
    }
}

impl fmt::Debug for ProxyDialer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyDialer")
            .field("direct", &self.direct)
            .field("route", &self.route)
            .field("timeout", &self.timeout)
            .field("http_enabled", &self.http_enabled)
            .finish_non_exhaustive()
    }
}

impl Dialer for ProxyDialer {
    fn dial(&self, network: &str, address: &str) -> Result<Connection> {
        match &self.route {
            Route::PassThrough(dialer) => dialer.dial(network, address),
            Route::Pool(pool) => {
                let raw = pick(pool, self.random.as_ref());
                self.dial_via(raw, network, address)
            }
        }
    }
}
