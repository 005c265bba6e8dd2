use std::io;

/// A Result alias where the Err case is [`DialError`].
pub type Result<T> = std::result::Result<T, DialError>;

/// Every failure a dial call can surface, from proxy selection to the
/// protocol handshake.
#[derive(Debug, thiserror::Error)]
pub enum DialError {
    #[error("error building proxy {url}")]
    MalformedProxyUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported proxy scheme {0}")]
    UnsupportedScheme(String),
    #[error("error building proxy {url}: {reason}")]
    ProxyBuild { url: String, reason: String },
    #[error("unknown network {0}")]
    UnknownNetwork(String),
    #[error("{proxy} proxy does not support network {network}")]
    NetworkNotSupported {
        proxy: &'static str,
        network: String,
    },
    #[error("address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("lookup {host}")]
    Lookup {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("mismatched local address type {0}")]
    MismatchedLocalAddr(String),
    #[error("no suitable address found for {0}")]
    NoSuitableAddress(String),
    #[error("interface bind failed")]
    InterfaceBind(#[source] io::Error),
    #[error("dial {network} {address}")]
    Connect {
        network: String,
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("{protocol} {stage}")]
    HandshakeIo {
        protocol: &'static str,
        stage: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{protocol} handshake failed: {reason}")]
    Handshake {
        protocol: &'static str,
        reason: String,
    },
    #[error("could not connect to proxy {proxy}: status code {status}")]
    ConnectStatus { proxy: String, status: u16 },
    #[error("{protocol} authentication failed: {reason}")]
    Auth {
        protocol: &'static str,
        reason: String,
    },
    #[error("proxy {proxy}")]
    Proxy {
        proxy: String,
        #[source]
        source: Box<DialError>,
    },
}
