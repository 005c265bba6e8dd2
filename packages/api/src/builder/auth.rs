//! Authenticated proxy entries
//!
//! Helpers that put credentials into a proxy URL with the percent-encoding
//! the URL form requires, so callers never hand-build `user:pass@` strings.

use proxydial_client::Url;

use crate::builder::core::DialBuilder;

impl DialBuilder {
    /// Add a proxy whose URL carries a username and password.
    ///
    /// # Arguments
    /// * `proxy` - Proxy URL without credentials, such as `socks5://10.0.0.1:1080`
    /// * `credentials` - `(username, password)`
    ///
    /// # Examples
    /// ```no_run
    /// use proxydial::DialBuilder;
    ///
    /// let dial = DialBuilder::new()
    ///     .proxy_with_auth("socks5://10.0.0.1:1080", ("alice", "p@ss:word"))
    ///     .build();
    /// ```
    ///
    /// An entry that cannot carry credentials is added unchanged and fails
    /// when a dial picks it.
    #[must_use]
    pub fn proxy_with_auth(self, proxy: &str, credentials: (&str, &str)) -> Self {
        let (username, password) = credentials;
        match with_credentials(proxy, username, password) {
            Some(url) => self.proxy(&url),
            None => {
                tracing::debug!(proxy, "proxy entry cannot carry credentials, adding it unchanged");
                self.proxy(proxy)
            }
        }
    }
}

fn with_credentials(proxy: &str, username: &str, password: &str) -> Option<String> {
    let mut url = Url::parse(proxy.trim()).ok()?;
    url.set_username(username).ok()?;
    url.set_password(Some(password).filter(|p| !p.is_empty())).ok()?;
    Some(url.to_string())
}
