//! Socket-level connection establishment
//!
//! Tries candidate addresses in order under one overall deadline. Each
//! attempt creates the socket through socket2 so the connect-time hook and
//! the local bind happen before the connect.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV6};
use std::time::{Duration, Instant};

use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use crate::connect::service::ControlHook;
use crate::connect::types::{Connection, Network};
use crate::error::{DialError, Result};

/// Local side of an outgoing socket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalBind {
    /// `None` binds the unspecified address of the candidate's family.
    pub ip: Option<IpAddr>,
    pub scope_id: u32,
}

impl LocalBind {
    fn socket_addr(self, family_of: &SocketAddr) -> SocketAddr {
        match self.ip {
            Some(IpAddr::V6(ip)) => SocketAddr::V6(SocketAddrV6::new(ip, 0, 0, self.scope_id)),
            Some(ip) => SocketAddr::new(ip, 0),
            None if family_of.is_ipv6() => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
            None => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
        }
    }
}

/// Connect to the first reachable candidate.
///
/// `timeout` is the budget for the whole list, not per address. A timeout
/// too large to form a deadline is treated as no timeout. The last failure
/// is returned when every candidate fails.
pub fn connect_to_address_list(
    network: Network,
    addrs: &[SocketAddr],
    local: Option<LocalBind>,
    control: Option<&ControlHook>,
    timeout: Option<Duration>,
) -> Result<Connection> {
    let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
    let mut last_error = None;

    for addr in addrs {
        let remaining = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(last_error.unwrap_or_else(|| {
                        connect_error(
                            network,
                            addr,
                            io::Error::new(io::ErrorKind::TimedOut, "dial timeout exceeded"),
                        )
                    }));
                }
                Some(deadline.saturating_duration_since(now))
            }
            None => None,
        };

        match connect_single(network, addr, local, control, remaining) {
            Ok(conn) => return Ok(conn),
            Err(e) => {
                tracing::debug!(%addr, error = ?e, "connect attempt failed");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DialError::NoSuitableAddress(format!("{network} target"))))
}

fn connect_single(
    network: Network,
    addr: &SocketAddr,
    local: Option<LocalBind>,
    control: Option<&ControlHook>,
    timeout: Option<Duration>,
) -> Result<Connection> {
    let (ty, protocol) = if network.is_stream() {
        (Type::STREAM, Protocol::TCP)
    } else {
        (Type::DGRAM, Protocol::UDP)
    };

    let socket = Socket::new(Domain::for_address(*addr), ty, Some(protocol))
        .map_err(|e| connect_error(network, addr, e))?;

    if let Some(hook) = control {
        hook(&socket).map_err(DialError::InterfaceBind)?;
    }

    if let Some(local) = local {
        let bind_addr = local.socket_addr(addr);
        socket
            .bind(&SockAddr::from(bind_addr))
            .map_err(|e| connect_error(network, addr, e))?;
    }

    let target = SockAddr::from(*addr);
    let connected = match timeout {
        Some(t) if network.is_stream() => socket.connect_timeout(&target, t),
        _ => socket.connect(&target),
    };
    connected.map_err(|e| connect_error(network, addr, e))?;

    Ok(if network.is_stream() {
        Connection::Tcp(socket.into())
    } else {
        Connection::Udp(socket.into())
    })
}

fn connect_error(network: Network, addr: &SocketAddr, source: io::Error) -> DialError {
    DialError::Connect {
        network: network.to_string(),
        address: addr.to_string(),
        source,
    }
}
