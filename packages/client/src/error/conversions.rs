use std::io;

use super::types::DialError;

impl From<DialError> for io::Error {
    fn from(err: DialError) -> Self {
        let kind = match err.root() {
            DialError::UnknownNetwork(_)
            | DialError::InvalidAddress { .. }
            | DialError::MismatchedLocalAddr(_) => io::ErrorKind::InvalidInput,
            DialError::NetworkNotSupported { .. } | DialError::UnsupportedScheme(_) => {
                io::ErrorKind::Unsupported
            }
            DialError::Auth { .. } => io::ErrorKind::PermissionDenied,
            _ => err.io_error().map_or(io::ErrorKind::Other, io::Error::kind),
        };
        io::Error::new(kind, err)
    }
}
