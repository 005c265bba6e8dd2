//! Proxy bypass rules
//!
//! `NO_PROXY`-style rules deciding which targets skip the proxy, and the
//! dialer that applies them.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use crate::addr::split_host_port;
use crate::connect::types::{Connection, Dialer};
use crate::error::Result;

/// Proxy bypass rules for conditional proxy usage
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProxyBypass {
    pub hosts: Vec<String>,
    /// Zones with a leading dot, matching the domain and its subdomains.
    pub zones: Vec<String>,
    pub ips: Vec<IpAddr>,
    pub networks: Vec<(IpAddr, u8)>,
}

impl ProxyBypass {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated `NO_PROXY` list.
    ///
    /// Entries may be a CIDR network (`10.0.0.0/8`), an IP address, a zone
    /// (`*.example.com` or `.example.com`) or a host name. Blank entries are
    /// skipped.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        let mut bypass = Self::new();
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            if let Some(network) = parse_cidr_pattern(entry) {
                bypass.networks.push(network);
            } else if let Some(ip) = parse_ip(entry) {
                bypass.ips.push(ip);
            } else if let Some(zone) = entry.strip_prefix("*.") {
                bypass = bypass.add_zone(zone);
            } else if let Some(zone) = entry.strip_prefix('.') {
                bypass = bypass.add_zone(zone);
            } else {
                bypass = bypass.add_host(entry);
            }
        }
        bypass
    }

    #[must_use]
    pub fn add_host(mut self, host: &str) -> Self {
        self.hosts.push(host.trim_end_matches('.').to_ascii_lowercase());
        self
    }

    /// Add a zone, matching the domain and all its subdomains.
    #[must_use]
    pub fn add_zone(mut self, zone: &str) -> Self {
        let zone = zone.trim_start_matches('.').trim_end_matches('.');
        self.zones.push(format!(".{}", zone.to_ascii_lowercase()));
        self
    }

    #[must_use]
    pub fn add_ip(mut self, ip: IpAddr) -> Self {
        self.ips.push(ip);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty() && self.zones.is_empty() && self.ips.is_empty() && self.networks.is_empty()
    }

    /// Check whether a target host (without port) should bypass the proxy.
    #[must_use]
    pub fn should_bypass(&self, host: &str) -> bool {
        if let Some(ip) = parse_ip(host) {
            return self.ips.contains(&ip)
                || self
                    .networks
                    .iter()
                    .any(|&(network, prefix_len)| ip_in_subnet(ip, network, prefix_len));
        }

        let host = host.trim_end_matches('.').to_ascii_lowercase();
        if self.hosts.iter().any(|h| *h == host) {
            return true;
        }
        self.zones
            .iter()
            .any(|zone| host.ends_with(zone.as_str()) || host == zone[1..])
    }
}

/// Routes targets matching the bypass rules to `bypass`, all others to `proxy`.
pub struct BypassDialer {
    rules: ProxyBypass,
    proxy: Arc<dyn Dialer>,
    bypass: Arc<dyn Dialer>,
}

impl BypassDialer {
    #[must_use]
    pub fn new(rules: ProxyBypass, proxy: Arc<dyn Dialer>, bypass: Arc<dyn Dialer>) -> Self {
        Self {
            rules,
            proxy,
            bypass,
        }
    }

    #[must_use]
    pub fn rules(&self) -> &ProxyBypass {
        &self.rules
    }
}

impl std::fmt::Debug for BypassDialer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BypassDialer")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl Dialer for BypassDialer {
    fn dial(&self, network: &str, address: &str) -> Result<Connection> {
        let (host, _) = split_host_port(address)?;
        if self.rules.should_bypass(host) {
            tracing::trace!(address, "target matches bypass rules, dialing direct");
            return self.bypass.dial(network, address);
        }
        self.proxy.dial(network, address)
    }
}

fn parse_ip(text: &str) -> Option<IpAddr> {
    let text = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(text);
    let text = text.split_once('%').map_or(text, |(ip, _)| ip);
    text.parse().ok()
}

/// Parse a CIDR pattern such as `192.168.1.0/24` or `2001:db8::/32`.
fn parse_cidr_pattern(pattern: &str) -> Option<(IpAddr, u8)> {
    let (network, prefix) = pattern.split_once('/')?;
    let network_addr = network.parse::<IpAddr>().ok()?;
    let prefix_len = prefix.parse::<u8>().ok()?;

    let max_prefix = match network_addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    };
    (prefix_len <= max_prefix).then_some((network_addr, prefix_len))
}

fn ip_in_subnet(ip: IpAddr, network: IpAddr, prefix_len: u8) -> bool {
    match (ip, network) {
        (IpAddr::V4(ip_v4), IpAddr::V4(net_v4)) => ipv4_in_subnet(ip_v4, net_v4, prefix_len),
        (IpAddr::V6(ip_v6), IpAddr::V6(net_v6)) => ipv6_in_subnet(ip_v6, net_v6, prefix_len),
        _ => false,
    }
}

fn ipv4_in_subnet(ip: Ipv4Addr, network: Ipv4Addr, prefix_len: u8) -> bool {
    if prefix_len == 0 {
        return true;
    }
    if prefix_len > 32 {
        return false;
    }
    let mask = u32::MAX << (32 - u32::from(prefix_len));
    (u32::from(ip) & mask) == (u32::from(network) & mask)
}

fn ipv6_in_subnet(ip: Ipv6Addr, network: Ipv6Addr, prefix_len: u8) -> bool {
    if prefix_len == 0 {
        return true;
    }
    if prefix_len > 128 {
        return false;
    }
    let mask = u128::MAX << (128 - u32::from(prefix_len));
    (u128::from(ip) & mask) == (u128::from(network) & mask)
}
