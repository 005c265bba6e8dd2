use std::io;

use super::types::DialError;

impl DialError {
    pub(crate) fn handshake(protocol: &'static str, reason: impl Into<String>) -> Self {
        Self::Handshake {
            protocol,
            reason: reason.into(),
        }
    }

    pub(crate) fn handshake_io(protocol: &'static str, stage: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::HandshakeIo {
            protocol,
            stage,
            source,
        }
    }

    pub(crate) fn invalid_address(address: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.to_owned(),
            reason: reason.into(),
        }
    }

    /// Attach the proxy in use to a failure that happened behind it.
    ///
    /// Errors which already name the proxy (malformed URL, unsupported scheme,
    /// build failure) are returned unchanged.
    #[must_use]
    pub fn with_proxy(self, proxy: impl Into<String>) -> Self {
        match self {
            e @ (Self::MalformedProxyUrl { .. }
            | Self::UnsupportedScheme(_)
            | Self::ProxyBuild { .. }
            | Self::Proxy { .. }) => e,
            other => Self::Proxy {
                proxy: proxy.into(),
                source: Box::new(other),
            },
        }
    }
}
