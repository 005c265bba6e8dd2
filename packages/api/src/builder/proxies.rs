//! Proxy list configuration
//!
//! Entries are not checked here; a bad entry fails the dial calls that pick it.

use crate::builder::core::DialBuilder;

impl DialBuilder {
    /// Add a proxy URL to the pool.
    ///
    /// # Examples
    /// ```no_run
    /// use proxydial::DialBuilder;
    ///
    /// let dial = DialBuilder::new()
    ///     .proxy("socks5://127.0.0.1:1080")
    ///     .proxy("socks4a://127.0.0.1:1081")
    ///     .build();
    /// ```
    #[must_use]
    pub fn proxy(mut self, url: &str) -> Self {
        self.proxies.push(url.trim().to_owned());
        self
    }

    /// Add several proxy URLs to the pool.
    #[must_use]
    pub fn proxies<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.proxies
            .extend(urls.into_iter().map(|url| url.as_ref().trim().to_owned()));
        self
    }

    /// Add every entry of a comma-separated proxy list.
    #[must_use]
    pub fn proxy_list(self, urls: &str) -> Self {
        if urls.is_empty() {
            return self;
        }
        self.proxies(urls.split(','))
    }

    /// Treat schemes other than SOCKS as HTTP CONNECT proxies.
    #[must_use]
    pub fn http_proxies(mut self, enabled: bool) -> Self {
        self.params.http_enabled = enabled;
        self
    }

    /// Drop all configured proxies, falling back to the system default.
    #[must_use]
    pub fn system_default(mut self) -> Self {
        self.proxies.clear();
        self
    }
}
