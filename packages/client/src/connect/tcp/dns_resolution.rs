//! Dial target resolution
//!
//! Literal IPs skip the system resolver. Host names go through it and the
//! results are filtered down to the network's address family.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs};

use crate::addr::host_port::{literal_socket_addr, split_host_port};
use crate::connect::types::Network;
use crate::error::{DialError, Result};

/// Resolve a `host:port` target into the candidate socket addresses for `network`.
pub fn resolve_target(network: Network, address: &str) -> Result<Vec<SocketAddr>> {
    let (host, port) = split_host_port(address)?;

    let candidates = if host.is_empty() {
        let loopback = if network.prefers_ipv6() {
            IpAddr::V6(Ipv6Addr::LOCALHOST)
        } else {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        };
        vec![SocketAddr::new(loopback, port)]
    } else if let Some(addr) = literal_socket_addr(host, port)? {
        vec![addr]
    } else {
        resolve_host_sync(host, port)?
    };

    let candidates: Vec<SocketAddr> = candidates
        .into_iter()
        .filter(|addr| network.accepts(addr))
        .collect();

    if candidates.is_empty() {
        return Err(DialError::NoSuitableAddress(address.to_owned()));
    }
    Ok(candidates)
}

/// Resolve a host name through the system resolver.
pub fn resolve_host_sync(host: &str, port: u16) -> Result<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|source| DialError::Lookup {
            host: host.to_owned(),
            source,
        })?
        .collect();
    tracing::trace!(host, count = addrs.len(), "resolved host");
    Ok(addrs)
}
