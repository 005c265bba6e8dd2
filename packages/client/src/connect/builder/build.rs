//! Build logic for DialFactory
//!
//! Assembles the direct dialer, the proxy route and the selection source
//! into a `ProxyDialer`.

use std::sync::Arc;

use super::types::DialFactory;
use crate::config::DialParams;
use crate::connect::service::{DirectDialer, ProxyDialer, Route};
use crate::connect::types::DialFn;
use crate::proxy::ProxyPool;

impl DialFactory {
    /// Build the concrete dialer for `params`.
    ///
    /// Nothing is dialed here. The interface hook, the proxy entries and
    /// their schemes are only exercised when a dial is attempted.
    #[must_use]
    pub fn dialer(&self, params: DialParams) -> ProxyDialer {
        let control = self.binder.hook(&params.interface);
        let direct = Arc::new(DirectDialer::new(params.timeout, params.local_addr.clone(), control));

        let route = if params.has_proxies() {
            let pool = ProxyPool::parse(&params.urls);
            tracing::debug!(entries = pool.len(), "proxy pool configured");
            Route::Pool(pool)
        } else {
            tracing::debug!("no proxy list, using system default dialer");
            Route::PassThrough(self.resolver.resolve(direct.clone()))
        };

        ProxyDialer::new(direct, route, params.timeout, params.http_enabled, self.random.clone())
    }

    /// Build a dial function for `params`.
    #[must_use]
    pub fn build(&self, params: DialParams) -> DialFn {
        self.dialer(params).into_fn()
    }
}

/// Build a dial function with the default factory.
#[must_use]
pub fn build(params: DialParams) -> DialFn {
    DialFactory::new().build(params)
}
