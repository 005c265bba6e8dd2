//! Direct connection establishment
//!
//! The base dialer every other path builds on: resolves the target, applies
//! the local address and the interface hook, and connects under the timeout.

use std::fmt;
use std::time::Duration;

use super::interface::ControlHook;
use crate::addr::ResolvedAddr;
use crate::addr::host_port::zone_scope_id;
use crate::connect::tcp::{LocalBind, connect_to_address_list, resolve_target};
use crate::connect::types::{Connection, Dialer, Network};
use crate::error::{DialError, Result};

/// Dialer connecting straight to the target.
///
/// Read-only after construction and safe to share between threads.
#[derive(Clone, Default)]
pub struct DirectDialer {
    timeout: Option<Duration>,
    local_addr: Option<ResolvedAddr>,
    control: Option<ControlHook>,
}

impl DirectDialer {
    /// A zero `timeout` means no timeout.
    #[must_use]
    pub fn new(timeout: Duration, local_addr: Option<ResolvedAddr>, control: Option<ControlHook>) -> Self {
        Self {
            timeout: (!timeout.is_zero()).then_some(timeout),
            local_addr,
            control,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[must_use]
    pub fn local_addr(&self) -> Option<&ResolvedAddr> {
        self.local_addr.as_ref()
    }

    #[must_use]
    pub fn has_control_hook(&self) -> bool {
        self.control.is_some()
    }

    fn local_bind(&self, network: Network) -> Result<Option<LocalBind>> {
        let (ip, zone) = match (&self.local_addr, network.is_stream()) {
            (None, _) => return Ok(None),
            (Some(ResolvedAddr::Tcp(a)), true) => (a.ip, a.zone.as_deref()),
            (Some(ResolvedAddr::Udp(a)), false) => (a.ip, a.zone.as_deref()),
            (Some(other), _) => return Err(DialError::MismatchedLocalAddr(other.to_string())),
        };
        let zone = zone.unwrap_or_default();
        let scope_id = zone_scope_id(zone)
            .ok_or_else(|| DialError::invalid_address(zone, "unknown zone on local address"))?;
        Ok(Some(LocalBind { ip, scope_id }))
    }
}

impl fmt::Debug for DirectDialer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectDialer")
            .field("timeout", &self.timeout)
            .field("local_addr", &self.local_addr)
            .field("control", &self.control.is_some())
            .finish()
    }
}

impl Dialer for DirectDialer {
    fn dial(&self, network: &str, address: &str) -> Result<Connection> {
        let network: Network = network.parse()?;
        let local = self.local_bind(network)?;

        let mut candidates = resolve_target(network, address)?;
        if let Some(local_ip) = local.and_then(|l| l.ip) {
            candidates.retain(|addr| addr.is_ipv4() == local_ip.is_ipv4());
            if candidates.is_empty() {
                return Err(DialError::NoSuitableAddress(address.to_owned()));
            }
        }

        tracing::trace!(%network, address, candidates = candidates.len(), "dialing direct");
        connect_to_address_list(network, &candidates, local, self.control.as_ref(), self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::resolve;
    use std::io::{Read, Write};
    use std::net::{TcpListener, UdpSocket};
    use std::thread;

    #[test]
    fn test_zero_timeout_means_none() {
        assert_eq!(DirectDialer::new(Duration::ZERO, None, None).timeout(), None);
        assert_eq!(
            DirectDialer::new(Duration::from_secs(3), None, None).timeout(),
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_tcp_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let addr = listener.local_addr().expect("listener addr");
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut buf = [0u8; 4];
            stream.read_exact(&mut buf).expect("read");
            stream.write_all(&buf).expect("echo");
        });

        let dialer = DirectDialer::new(Duration::from_secs(5), None, None);
        let mut conn = dialer.dial("tcp", &addr.to_string()).expect("direct dial");
        conn.write_all(b"ping").expect("write");
        let mut buf = [0u8; 4];
        conn.read_exact(&mut buf).expect("read echo");
        assert_eq!(&buf, b"ping");
        server.join().expect("server thread");
    }

    #[test]
    fn test_local_address_is_used() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let addr = listener.local_addr().expect("listener addr");
        let dialer = DirectDialer::new(Duration::ZERO, resolve("tcp", "127.0.0.1"), None);

        let conn = dialer.dial("tcp4", &addr.to_string()).expect("dial with local addr");
        assert!(conn.local_addr().expect("local addr").ip().is_loopback());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_local_address_with_interface_zone() {
        let Ok(listener) = TcpListener::bind("[::1]:0") else {
            return;
        };
        let addr = listener.local_addr().expect("listener addr");
        let dialer = DirectDialer::new(Duration::from_secs(2), resolve("tcp", "::1%lo"), None);

        let conn = dialer.dial("tcp", &addr.to_string()).expect("named zone resolves to an index");
        assert!(conn.local_addr().expect("local addr").ip().is_loopback());
    }

    #[test]
    fn test_local_address_with_unknown_interface_zone() {
        let dialer = DirectDialer::new(Duration::ZERO, resolve("tcp", "fe80::1%nosuchif0"), None);
        let err = dialer.dial("tcp", "[::1]:9").expect_err("no such interface");
        assert!(matches!(err, DialError::InvalidAddress { .. }));
    }

    #[test]
    fn test_mismatched_local_address_type() {
        let dialer = DirectDialer::new(Duration::ZERO, resolve("udp", "127.0.0.1"), None);
        let err = dialer.dial("tcp", "127.0.0.1:9").expect_err("udp local addr on tcp dial");
        assert!(matches!(err, DialError::MismatchedLocalAddr(_)));

        let dialer = DirectDialer::new(Duration::ZERO, resolve("ip", "127.0.0.1"), None);
        let err = dialer.dial("udp", "127.0.0.1:9").expect_err("ip local addr on udp dial");
        assert!(matches!(err, DialError::MismatchedLocalAddr(_)));
    }

    #[test]
    fn test_local_family_filters_candidates() {
        let dialer = DirectDialer::new(Duration::ZERO, resolve("tcp", "127.0.0.1"), None);
        let err = dialer.dial("tcp", "[::1]:9").expect_err("v4 local cannot reach v6 target");
        assert!(matches!(err, DialError::NoSuitableAddress(_)));
    }

    #[test]
    fn test_udp_dial() {
        let peer = UdpSocket::bind("127.0.0.1:0").expect("bind peer");
        let peer_addr = peer.local_addr().expect("peer addr");
        let dialer = DirectDialer::default();

        let mut conn = dialer.dial("udp", &peer_addr.to_string()).expect("udp dial");
        conn.write_all(b"hi").expect("send");
        let mut buf = [0u8; 2];
        let (n, _) = peer.recv_from(&mut buf).expect("recv");
        assert_eq!(&buf[..n], b"hi");
    }

    #[test]
    fn test_unknown_network() {
        let err = DirectDialer::default().dial("unix", "/tmp/sock:0").expect_err("unix unsupported");
        assert!(matches!(err, DialError::UnknownNetwork(_)));
    }
}
