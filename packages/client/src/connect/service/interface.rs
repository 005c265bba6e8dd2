//! Interface binding hook
//!
//! The hook runs on the raw socket before it is bound or connected, so a
//! bind failure surfaces at connect time rather than at construction.

use std::io;
use std::sync::Arc;

use socket2::Socket;

/// Connect-time socket setup callback.
pub type ControlHook = Arc<dyn Fn(&Socket) -> io::Result<()> + Send + Sync>;

/// Produces the connect-time hook that pins sockets to a named interface.
pub trait InterfaceBinder: Send + Sync {
    /// `None` when no binding is wanted (empty interface name).
    fn hook(&self, interface: &str) -> Option<ControlHook>;
}

/// Binder backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformBinder;

impl InterfaceBinder for PlatformBinder {
    fn hook(&self, interface: &str) -> Option<ControlHook> {
        bind_to_interface(interface)
    }
}

/// Hook binding every socket to `interface`, `None` for an empty name.
#[must_use]
pub fn bind_to_interface(interface: &str) -> Option<ControlHook> {
    if interface.is_empty() {
        return None;
    }
    let interface = interface.to_owned();
    Some(Arc::new(move |socket: &Socket| bind_device(socket, &interface)))
}

#[cfg(any(target_os = "android", target_os = "fuchsia", target_os = "linux"))]
fn bind_device(socket: &Socket, interface: &str) -> io::Result<()> {
    socket
        .bind_device(Some(interface.as_bytes()))
        .map_err(|e| io::Error::new(e.kind(), format!("bind to interface {interface}: {e}")))
}

#[cfg(not(any(target_os = "android", target_os = "fuchsia", target_os = "linux")))]
fn bind_device(_socket: &Socket, interface: &str) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("binding to interface {interface} is not supported on this platform"),
    ))
}
