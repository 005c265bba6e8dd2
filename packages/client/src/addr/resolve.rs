//! Textual address resolution into typed addresses
//!
//! Splits off an IPv6 zone suffix, parses the literal and picks the address
//! variant from the network name. Validation is deferred: a literal that does
//! not parse is carried as an absent IP and only fails once a socket uses it.

use std::fmt;
use std::net::IpAddr;

/// TCP endpoint address. Port is always chosen by the OS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TcpAddr {
    pub ip: Option<IpAddr>,
    pub zone: Option<String>,
}

/// UDP endpoint address. Port is always chosen by the OS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UdpAddr {
    pub ip: Option<IpAddr>,
    pub zone: Option<String>,
}

/// Bare IP address without transport or zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IpOnlyAddr {
    pub ip: Option<IpAddr>,
}

/// Result of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedAddr {
    Tcp(TcpAddr),
    Udp(UdpAddr),
    Ip(IpOnlyAddr),
}

impl ResolvedAddr {
    /// The parsed IP, `None` when the literal was not a valid IP.
    #[must_use]
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Self::Tcp(a) => a.ip,
            Self::Udp(a) => a.ip,
            Self::Ip(a) => a.ip,
        }
    }

    #[must_use]
    pub fn zone(&self) -> Option<&str> {
        match self {
            Self::Tcp(a) => a.zone.as_deref(),
            Self::Udp(a) => a.zone.as_deref(),
            Self::Ip(_) => None,
        }
    }

    /// Name of the address family this variant belongs to.
    #[must_use]
    pub fn network(&self) -> &'static str {
        match self {
            Self::Tcp(_) => "tcp",
            Self::Udp(_) => "udp",
            Self::Ip(_) => "ip",
        }
    }
}

impl fmt::Display for ResolvedAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip() {
            Some(ip) => write!(f, "{ip}")?,
            None => f.write_str("<nil>")?,
        }
        match self.zone() {
            Some(zone) if !zone.is_empty() => write!(f, "%{zone}"),
            _ => Ok(()),
        }
    }
}

/// Map a textual address plus network name to a typed address.
///
/// An empty `addr` yields `None`, meaning "unspecified". Everything after the
/// first `%` is the zone. `tcp*` and `udp*` networks keep the zone; any other
/// network, including an empty or unknown one, yields [`ResolvedAddr::Ip`].
#[must_use]
pub fn resolve(network: &str, addr: &str) -> Option<ResolvedAddr> {
    if addr.is_empty() {
        return None;
    }

    let (literal, zone) = match addr.split_once('%') {
        Some((literal, zone)) => (literal, Some(zone.to_owned())),
        None => (addr, None),
    };

    let ip = literal.parse::<IpAddr>().ok();

    Some(match network {
        "tcp" | "tcp4" | "tcp6" => ResolvedAddr::Tcp(TcpAddr { ip, zone }),
        "udp" | "udp4" | "udp6" => ResolvedAddr::Udp(UdpAddr { ip, zone }),
        _ => ResolvedAddr::Ip(IpOnlyAddr { ip }),
    })
}
