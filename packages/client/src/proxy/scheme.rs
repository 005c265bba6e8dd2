//! Proxy scheme classification

/// Protocol family a proxy URL scheme selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyKind {
    /// `socks5`, `socks5h`
    Socks5,
    /// `socks4`, `socks4a`
    Socks4,
    /// Any other scheme: an HTTP CONNECT proxy when HTTP proxies are enabled,
    /// unsupported otherwise.
    Other,
}

impl ProxyKind {
    /// Exact, case-sensitive match on the scheme.
    #[must_use]
    pub fn from_scheme(scheme: &str) -> Self {
        match scheme {
            "socks5" | "socks5h" => Self::Socks5,
            "socks4" | "socks4a" => Self::Socks4,
            _ => Self::Other,
        }
    }
}
