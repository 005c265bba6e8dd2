//! `host:port` splitting and zoned literal handling for dial targets

use std::net::{IpAddr, Ipv6Addr, SocketAddr, SocketAddrV6};

use crate::error::{DialError, Result};

/// Split `host:port`, `[v6]:port` or `[v6%zone]:port`.
///
/// The returned host has its brackets removed but keeps any zone suffix.
pub fn split_host_port(address: &str) -> Result<(&str, u16)> {
    let (host, port) = if let Some(rest) = address.strip_prefix('[') {
        let end = rest
            .find(']')
            .ok_or_else(|| DialError::invalid_address(address, "missing ']' in address"))?;
        let port = rest[end + 1..]
            .strip_prefix(':')
            .ok_or_else(|| DialError::invalid_address(address, "missing port in address"))?;
        (&rest[..end], port)
    } else {
        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| DialError::invalid_address(address, "missing port in address"))?;
        if host.contains(':') {
            return Err(DialError::invalid_address(address, "too many colons in address"));
        }
        (host, port)
    };

    let port = port
        .parse::<u16>()
        .map_err(|_| DialError::invalid_address(address, "invalid port"))?;
    Ok((host, port))
}

/// Join a host and port, bracketing bare IPv6 literals.
#[must_use]
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// IPv6 scope id for a zone. Empty zones mean "no scope".
///
/// Numeric zones are taken as the index itself; names are looked up as
/// network interfaces. `None` when no such interface exists.
#[must_use]
pub fn zone_scope_id(zone: &str) -> Option<u32> {
    if zone.is_empty() {
        return Some(0);
    }
    zone.parse().ok().or_else(|| interface_index(zone))
}

#[cfg(unix)]
fn interface_index(name: &str) -> Option<u32> {
    nix::net::if_::if_nametoindex(name).ok().filter(|&index| index != 0)
}

#[cfg(not(unix))]
fn interface_index(_name: &str) -> Option<u32> {
    None
}

/// Socket address for an IP literal host, `None` when the host is a name.
pub fn literal_socket_addr(host: &str, port: u16) -> Result<Option<SocketAddr>> {
    match host.split_once('%') {
        Some((literal, zone)) => {
            let ip = literal
                .parse::<Ipv6Addr>()
                .map_err(|_| DialError::invalid_address(host, "zone on a non-IPv6 literal"))?;
            let scope = zone_scope_id(zone)
                .ok_or_else(|| DialError::invalid_address(host, format!("unknown zone {zone}")))?;
            Ok(Some(SocketAddr::V6(SocketAddrV6::new(ip, port, 0, scope))))
        }
        None => Ok(host.parse::<IpAddr>().ok().map(|ip| SocketAddr::new(ip, port))),
    }
}
