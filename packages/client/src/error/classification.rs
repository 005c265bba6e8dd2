use std::io;

use super::types::DialError;

impl DialError {
    /// The underlying failure with any proxy context removed.
    #[must_use]
    pub fn root(&self) -> &DialError {
        match self {
            Self::Proxy { source, .. } => source.root(),
            other => other,
        }
    }

    /// The proxy this failure happened behind, if any.
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        match self {
            Self::Proxy { proxy, .. } => Some(proxy),
            _ => None,
        }
    }

    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self.root() {
            Self::Lookup { source, .. }
            | Self::InterfaceBind(source)
            | Self::Connect { source, .. }
            | Self::HandshakeIo { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether the dial ran out of time, either connecting or during a handshake.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.io_error().is_some_and(|e| {
            matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
        })
    }
}
