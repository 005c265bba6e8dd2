//! HTTP CONNECT tunnel establishment
//!
//! Sends `CONNECT host:port` to an HTTP proxy and consumes the response head.
//! The head is read byte by byte so no tunnel payload is swallowed.

use std::io::{Read, Write};

use crate::error::{DialError, Result};

const MAX_RESPONSE_HEAD: usize = 8 * 1024;

/// Establish an HTTP CONNECT tunnel to `target` over a stream connected to `proxy`.
///
/// `auth` is the base64 `user:password` value for `Proxy-Authorization: Basic`.
pub fn establish_connect_tunnel<S: Read + Write>(
    stream: &mut S,
    proxy: &str,
    target: &str,
    auth: Option<&str>,
) -> Result<()> {
    let mut request = format!("CONNECT {target} HTTP/1.1\r\nHost: {target}\r\n");
    if let Some(auth) = auth {
        request.push_str(&format!("Proxy-Authorization: Basic {auth}\r\n"));
    }
    request.push_str("\r\n");

    tracing::trace!(proxy, target, "sending CONNECT request");
    stream
        .write_all(request.as_bytes())
        .map_err(DialError::handshake_io("http connect", "sending request"))?;
    stream
        .flush()
        .map_err(DialError::handshake_io("http connect", "sending request"))?;

    let head = read_response_head(stream)?;
    let status_line = head.lines().next().unwrap_or_default();
    let status = parse_status(status_line).ok_or_else(|| {
        DialError::handshake("http connect", format!("invalid response: {}", status_line.trim()))
    })?;

    match status {
        200 => Ok(()),
        407 => Err(DialError::Auth {
            protocol: "http connect",
            reason: "proxy authentication required (407)".to_string(),
        }),
        status => Err(DialError::ConnectStatus {
            proxy: proxy.to_owned(),
            status,
        }),
    }
}

fn read_response_head<S: Read>(stream: &mut S) -> Result<String> {
    let mut head = Vec::with_capacity(128);
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        if head.len() >= MAX_RESPONSE_HEAD {
            return Err(DialError::handshake("http connect", "response head too large"));
        }
        let n = stream
            .read(&mut byte)
            .map_err(DialError::handshake_io("http connect", "reading response"))?;
        if n == 0 {
            return Err(DialError::handshake(
                "http connect",
                "proxy closed the connection before the response ended",
            ));
        }
        head.push(byte[0]);
    }
    Ok(String::from_utf8_lossy(&head).into_owned())
}

fn parse_status(status_line: &str) -> Option<u16> {
    let mut parts = status_line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    struct Scripted {
        input: Cursor<Vec<u8>>,
        written: Vec<u8>,
    }

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for Scripted {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn scripted(response: &str) -> Scripted {
        Scripted {
            input: Cursor::new(response.as_bytes().to_vec()),
            written: Vec::new(),
        }
    }

    #[test]
    fn test_tunnel_established_leaves_payload_unread() {
        let mut stream = scripted("HTTP/1.1 200 Connection established\r\nProxy-Agent: x\r\n\r\npayload");
        establish_connect_tunnel(&mut stream, "proxy:3128", "example.com:443", None)
            .expect("tunnel established");

        let request = String::from_utf8(stream.written.clone()).expect("ascii request");
        assert!(request.starts_with("CONNECT example.com:443 HTTP/1.1\r\nHost: example.com:443\r\n"));

        let mut rest = String::new();
        stream.read_to_string(&mut rest).expect("read remaining");
        assert_eq!(rest, "payload");
    }

    #[test]
    fn test_basic_auth_header() {
        let mut stream = scripted("HTTP/1.0 200 OK\r\n\r\n");
        establish_connect_tunnel(&mut stream, "proxy:3128", "h:1", Some("dXNlcjpwYXNz"))
            .expect("tunnel established");
        let request = String::from_utf8(stream.written).expect("ascii request");
        assert!(request.contains("Proxy-Authorization: Basic dXNlcjpwYXNz\r\n"));
    }

    #[test]
    fn test_status_codes() {
        let mut stream = scripted("HTTP/1.1 407 Proxy Authentication Required\r\n\r\n");
        let err = establish_connect_tunnel(&mut stream, "proxy:3128", "h:1", None).expect_err("407");
        assert!(matches!(err, DialError::Auth { .. }));

        let mut stream = scripted("HTTP/1.1 502 Bad Gateway\r\n\r\n");
        let err = establish_connect_tunnel(&mut stream, "proxy:3128", "h:1", None).expect_err("502");
        assert!(matches!(err, DialError::ConnectStatus { status: 502, .. }));
    }

    #[test]
    fn test_truncated_response() {
        let mut stream = scripted("HTTP/1.1 200");
        let err = establish_connect_tunnel(&mut stream, "proxy:3128", "h:1", None).expect_err("eof");
        assert!(matches!(err, DialError::Handshake { .. }));
    }
}
