//! SOCKS proxy clients
//!
//! `Socks5Client` reaches its proxy through a forward dialer (normally the
//! direct dialer, so local address and interface binding apply).
//! `Socks4Client` is built from the raw URL string and opens its own
//! connection to the proxy.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::addr::split_host_port;
use crate::connect::tcp::{
    Socks4Target, SocksCredentials, connect_to_address_list, resolve_host_sync, resolve_target,
    socks4_handshake, socks5_handshake,
};
use crate::connect::types::{Connection, Dialer, Network};
use crate::error::{DialError, Result};
use crate::proxy::url_handling::{credentials, parse_duration, proxy_address, query_param, redact};

/// Port used when a SOCKS proxy URL names none.
pub const DEFAULT_SOCKS_PORT: u16 = 1080;

/// SOCKS5 client for `socks5://` and `socks5h://` URLs.
///
/// Both schemes send the target host name to the proxy unresolved.
pub struct Socks5Client {
    proxy_addr: String,
    auth: Option<SocksCredentials>,
    forward: Arc<dyn Dialer>,
}

impl Socks5Client {
    /// Build from a parsed proxy URL, reaching the proxy through `forward`.
    ///
    /// # Errors
    ///
    /// Fails when the URL has no host, or its user info cannot be decoded or
    /// does not fit the RFC 1929 limits.
    pub fn from_url(url: &Url, forward: Arc<dyn Dialer>) -> Result<Self> {
        let build_error = |reason: String| DialError::ProxyBuild {
            url: redact(url),
            reason,
        };

        let proxy_addr = proxy_address(url, DEFAULT_SOCKS_PORT)
            .ok_or_else(|| build_error("missing proxy host".to_string()))?;

        let auth = match credentials(url).map_err(build_error)? {
            None => None,
            Some((username, password)) => {
                if username.is_empty() {
                    return Err(build_error("empty socks5 username".to_string()));
                }
                if username.len() > 255 || password.len() > 255 {
                    return Err(build_error(
                        "socks5 username and password are limited to 255 bytes".to_string(),
                    ));
                }
                Some(SocksCredentials { username, password })
            }
        };

        Ok(Self {
            proxy_addr,
            auth,
            forward,
        })
    }

    #[must_use]
    pub fn proxy_addr(&self) -> &str {
        &self.proxy_addr
    }

    #[must_use]
    pub fn has_auth(&self) -> bool {
        self.auth.is_some()
    }
}

impl std::fmt::Debug for Socks5Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Socks5Client")
            .field("proxy_addr", &self.proxy_addr)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl Dialer for Socks5Client {
    fn dial(&self, network: &str, address: &str) -> Result<Connection> {
        let parsed: Network = network.parse()?;
        if !parsed.is_stream() {
            return Err(DialError::NetworkNotSupported {
                proxy: "socks5",
                network: network.to_owned(),
            });
        }
        let (host, port) = split_host_port(address)?;

        tracing::debug!(proxy = %self.proxy_addr, target = address, "dialing through socks5 proxy");
        let mut conn = self.forward.dial("tcp", &self.proxy_addr)?;
        socks5_handshake(&mut conn, host, port, self.auth.as_ref())?;
        Ok(conn)
    }
}

/// SOCKS4 client for `socks4://` and `socks4a://` URLs.
///
/// The URL user name is sent as the SOCKS4 user id and an optional
/// `?timeout=` query value bounds the connect to the proxy.
#[derive(Debug, Clone)]
pub struct Socks4Client {
    proxy_addr: String,
    user_id: String,
    remote_resolve: bool,
    timeout: Option<Duration>,
}

impl Socks4Client {
    /// Build from the raw proxy URL string.
    ///
    /// # Errors
    ///
    /// Fails when the string is not a `socks4`/`socks4a` URL with a host, or
    /// the `timeout` parameter is not a valid duration.
    pub fn from_url(raw: &str) -> Result<Self> {
        let build_error = |reason: String| DialError::ProxyBuild {
            url: raw.to_owned(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| build_error(e.to_string()))?;
        let remote_resolve = match url.scheme() {
            "socks4" => false,
            "socks4a" => true,
            other => return Err(build_error(format!("not a socks4 scheme: {other}"))),
        };
        let proxy_addr = proxy_address(&url, DEFAULT_SOCKS_PORT)
            .ok_or_else(|| build_error("missing proxy host".to_string()))?;
        let user_id = credentials(&url)
            .map_err(build_error)?
            .map(|(username, _)| username)
            .unwrap_or_default();
        let timeout = match query_param(&url, "timeout") {
            Some(value) => Some(
                parse_duration(&value)
                    .ok_or_else(|| build_error(format!("invalid timeout {value}")))?,
            )
            .filter(|t| !t.is_zero()),
            None => None,
        };

        Ok(Self {
            proxy_addr,
            user_id,
            remote_resolve,
            timeout,
        })
    }

    #[must_use]
    pub fn proxy_addr(&self) -> &str {
        &self.proxy_addr
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// `true` for SOCKS4a.
    #[must_use]
    pub fn resolves_remotely(&self) -> bool {
        self.remote_resolve
    }

    fn local_ipv4(host: &str, port: u16) -> Result<Ipv4Addr> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return match ip {
                IpAddr::V4(v4) => Ok(v4),
                IpAddr::V6(_) => Err(DialError::invalid_address(host, "socks4 cannot reach IPv6 targets")),
            };
        }
        resolve_host_sync(host, port)?
            .into_iter()
            .find_map(|addr| match addr.ip() {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .ok_or_else(|| DialError::invalid_address(host, "no IPv4 address for socks4"))
    }
}

impl Dialer for Socks4Client {
    fn dial(&self, network: &str, address: &str) -> Result<Connection> {
        let parsed: Network = network.parse()?;
        if !parsed.is_stream() {
            return Err(DialError::NetworkNotSupported {
                proxy: "socks4",
                network: network.to_owned(),
            });
        }
        let (host, port) = split_host_port(address)?;

        let target = match host.parse::<Ipv4Addr>() {
            Ok(ip) => Socks4Target::Ip(ip),
            Err(_) if self.remote_resolve => Socks4Target::Domain(host),
            Err(_) => Socks4Target::Ip(Self::local_ipv4(host, port)?),
        };

        tracing::debug!(proxy = %self.proxy_addr, target = address, socks4a = self.remote_resolve, "dialing through socks4 proxy");
        let candidates = resolve_target(Network::Tcp, &self.proxy_addr)?;
        let mut conn = connect_to_address_list(Network::Tcp, &candidates, None, None, self.timeout)?;
        socks4_handshake(&mut conn, &target, port, &self.user_id)?;
        Ok(conn)
    }
}
