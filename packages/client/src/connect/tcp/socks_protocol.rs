//! SOCKS protocol implementation
//!
//! SOCKS4/4a (user id, remote name resolution) and SOCKS5 (RFC 1928) with
//! username/password authentication (RFC 1929). The handshakes run over any
//! `Read + Write` stream already connected to the proxy.

use std::io::{Read, Write};
use std::net::{IpAddr, Ipv4Addr};

use crate::error::{DialError, Result};

const SOCKS4_VERSION: u8 = 0x04;
const SOCKS5_VERSION: u8 = 0x05;
const CMD_CONNECT: u8 = 0x01;

const AUTH_NO_AUTH: u8 = 0x00;
const AUTH_USERNAME_PASSWORD: u8 = 0x02;
const AUTH_NO_ACCEPTABLE: u8 = 0xFF;
const AUTH_SUBNEG_VERSION: u8 = 0x01;

const ATYP_IPV4: u8 = 0x01;
const ATYP_DOMAIN: u8 = 0x03;
const ATYP_IPV6: u8 = 0x04;

const SOCKS4_GRANTED: u8 = 0x5A;

/// Username/password pair sent to a SOCKS5 proxy.
#[derive(Clone, PartialEq, Eq)]
pub struct SocksCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SocksCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocksCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Destination as sent in a SOCKS4 request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Socks4Target<'a> {
    Ip(Ipv4Addr),
    /// SOCKS4a: the proxy resolves the name.
    Domain(&'a str),
}

/// SOCKS4/4a CONNECT.
pub fn socks4_handshake<S: Read + Write>(
    stream: &mut S,
    target: &Socks4Target<'_>,
    target_port: u16,
    user_id: &str,
) -> Result<()> {
    let mut request = Vec::with_capacity(9 + user_id.len());
    request.push(SOCKS4_VERSION);
    request.push(CMD_CONNECT);
    request.extend_from_slice(&target_port.to_be_bytes());
    match target {
        Socks4Target::Ip(ip) => request.extend_from_slice(&ip.octets()),
        // 0.0.0.x with x != 0 tells the proxy a host name follows
        Socks4Target::Domain(_) => request.extend_from_slice(&[0, 0, 0, 1]),
    }
    request.extend_from_slice(user_id.as_bytes());
    request.push(0x00);
    if let Socks4Target::Domain(host) = target {
        request.extend_from_slice(host.as_bytes());
        request.push(0x00);
    }

    stream
        .write_all(&request)
        .map_err(DialError::handshake_io("socks4", "sending connect request"))?;

    let mut response = [0u8; 8];
    stream
        .read_exact(&mut response)
        .map_err(DialError::handshake_io("socks4", "reading reply"))?;

    match response[1] {
        SOCKS4_GRANTED => Ok(()),
        0x5B => Err(DialError::handshake("socks4", "request rejected or failed")),
        0x5C => Err(DialError::handshake(
            "socks4",
            "request rejected: proxy cannot connect to identd on the client",
        )),
        0x5D => Err(DialError::handshake(
            "socks4",
            "request rejected: client program and identd report different user ids",
        )),
        code => Err(DialError::handshake("socks4", format!("unknown reply code {code:#04x}"))),
    }
}

/// SOCKS5 CONNECT, negotiating username/password when credentials are given.
pub fn socks5_handshake<S: Read + Write>(
    stream: &mut S,
    target_host: &str,
    target_port: u16,
    auth: Option<&SocksCredentials>,
) -> Result<()> {
    let greeting: &[u8] = if auth.is_some() {
        &[SOCKS5_VERSION, 2, AUTH_NO_AUTH, AUTH_USERNAME_PASSWORD]
    } else {
        &[SOCKS5_VERSION, 1, AUTH_NO_AUTH]
    };
    stream
        .write_all(greeting)
        .map_err(DialError::handshake_io("socks5", "sending greeting"))?;

    let mut choice = [0u8; 2];
    stream
        .read_exact(&mut choice)
        .map_err(DialError::handshake_io("socks5", "reading method selection"))?;
    if choice[0] != SOCKS5_VERSION {
        return Err(DialError::handshake(
            "socks5",
            format!("unexpected protocol version {}", choice[0]),
        ));
    }

    match (choice[1], auth) {
        (AUTH_NO_AUTH, _) => {}
        (AUTH_USERNAME_PASSWORD, Some(credentials)) => authenticate(stream, credentials)?,
        (AUTH_NO_ACCEPTABLE, _) => {
            return Err(DialError::Auth {
                protocol: "socks5",
                reason: "no acceptable authentication methods".to_string(),
            });
        }
        (method, _) => {
            return Err(DialError::handshake(
                "socks5",
                format!("unsupported authentication method {method:#04x}"),
            ));
        }
    }

    let mut request = Vec::with_capacity(22);
    request.extend_from_slice(&[SOCKS5_VERSION, CMD_CONNECT, 0x00]);
    match target_host.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) => {
            request.push(ATYP_IPV4);
            request.extend_from_slice(&ip.octets());
        }
        Ok(IpAddr::V6(ip)) => {
            request.push(ATYP_IPV6);
            request.extend_from_slice(&ip.octets());
        }
        Err(_) => {
            let len = u8::try_from(target_host.len()).map_err(|_| {
                DialError::invalid_address(target_host, "host name too long for socks5")
            })?;
            request.push(ATYP_DOMAIN);
            request.push(len);
            request.extend_from_slice(target_host.as_bytes());
        }
    }
    request.extend_from_slice(&target_port.to_be_bytes());

    stream
        .write_all(&request)
        .map_err(DialError::handshake_io("socks5", "sending connect request"))?;

    let mut response = [0u8; 4];
    stream
        .read_exact(&mut response)
        .map_err(DialError::handshake_io("socks5", "reading reply"))?;
    if response[0] != SOCKS5_VERSION {
        return Err(DialError::handshake(
            "socks5",
            format!("unexpected protocol version {}", response[0]),
        ));
    }
    if response[1] != 0x00 {
        return Err(DialError::handshake("socks5", socks5_reply_message(response[1])));
    }

    // Bound address and port are not needed by callers
    let skip = match response[3] {
        ATYP_IPV4 => 4 + 2,
        ATYP_IPV6 => 16 + 2,
        ATYP_DOMAIN => {
            let mut len = [0u8; 1];
            stream
                .read_exact(&mut len)
                .map_err(DialError::handshake_io("socks5", "reading bound address"))?;
            usize::from(len[0]) + 2
        }
        atyp => {
            return Err(DialError::handshake(
                "socks5",
                format!("unknown address type {atyp} in reply"),
            ));
        }
    };
    let mut bound = vec![0u8; skip];
    stream
        .read_exact(&mut bound)
        .map_err(DialError::handshake_io("socks5", "reading bound address"))?;

    Ok(())
}

fn authenticate<S: Read + Write>(stream: &mut S, credentials: &SocksCredentials) -> Result<()> {
    let username = credentials.username.as_bytes();
    let password = credentials.password.as_bytes();
    let (Ok(ulen), Ok(plen)) = (u8::try_from(username.len()), u8::try_from(password.len())) else {
        return Err(DialError::Auth {
            protocol: "socks5",
            reason: "username or password longer than 255 bytes".to_string(),
        });
    };

    let mut request = Vec::with_capacity(3 + username.len() + password.len());
    request.push(AUTH_SUBNEG_VERSION);
    request.push(ulen);
    request.extend_from_slice(username);
    request.push(plen);
    request.extend_from_slice(password);

    stream
        .write_all(&request)
        .map_err(DialError::handshake_io("socks5", "sending credentials"))?;

    let mut status = [0u8; 2];
    stream
        .read_exact(&mut status)
        .map_err(DialError::handshake_io("socks5", "reading authentication status"))?;
    if status[1] != 0x00 {
        return Err(DialError::Auth {
            protocol: "socks5",
            reason: "username/password rejected".to_string(),
        });
    }
    Ok(())
}

fn socks5_reply_message(code: u8) -> String {
    match code {
        0x01 => "general SOCKS server failure".to_string(),
        0x02 => "connection not allowed by ruleset".to_string(),
        0x03 => "network unreachable".to_string(),
        0x04 => "host unreachable".to_string(),
        0x05 => "connection refused".to_string(),
        0x06 => "TTL expired".to_string(),
        0x07 => "command not supported".to_string(),
        0x08 => "address type not supported".to_string(),
        other => format!("unknown reply code {other:#04x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Scripted proxy side: reads come from `input`, writes are recorded.
    struct Scripted {
        input: Cursor<Vec<u8>>,
        written: Vec<u8>,
    }

    impl Scripted {
        fn new(input: &[u8]) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                written: Vec::new(),
            }
        }
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

    #[test]
    fn test_socks5_domain_request_without_auth() {
        let mut stream = Scripted::new(&[5, 0, 5, 0, 0, 1, 0, 0, 0, 0, 0, 0]);
        socks5_handshake(&mut stream, "example.com", 443, None).expect("handshake succeeds");

        let mut expected = vec![5, 1, 0, 5, 1, 0, ATYP_DOMAIN, 11];
        expected.extend_from_slice(b"example.com");
        expected.extend_from_slice(&443u16.to_be_bytes());
        assert_eq!(stream.written, expected);
    }

    #[test]
    fn test_socks5_username_password() {
        let mut stream = Scripted::new(&[5, 2, 1, 0, 5, 0, 0, 1, 0, 0, 0, 0, 0, 0]);
        let credentials = SocksCredentials {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        socks5_handshake(&mut stream, "10.0.0.1", 80, Some(&credentials)).expect("handshake succeeds");

        assert_eq!(&stream.written[..4], &[5, 2, AUTH_NO_AUTH, AUTH_USERNAME_PASSWORD]);
        assert_eq!(&stream.written[4..6], &[AUTH_SUBNEG_VERSION, 5]);
        assert_eq!(&stream.written[6..11], b"alice");
    }

    #[test]
    fn test_socks5_rejected_credentials() {
        let mut stream = Scripted::new(&[5, 2, 1, 1]);
        let credentials = SocksCredentials {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        };
        let err = socks5_handshake(&mut stream, "10.0.0.1", 80, Some(&credentials))
            .expect_err("bad credentials");
        assert!(matches!(err, DialError::Auth { .. }));
    }

    #[test]
    fn test_socks5_reply_failure() {
        let mut stream = Scripted::new(&[5, 0, 5, 5, 0, 1, 0, 0, 0, 0, 0, 0]);
        let err = socks5_handshake(&mut stream, "10.0.0.1", 80, None).expect_err("refused");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_socks5_truncated_reply_is_io_error() {
        let mut stream = Scripted::new(&[5, 0, 5]);
        let err = socks5_handshake(&mut stream, "10.0.0.1", 80, None).expect_err("truncated");
        assert!(matches!(err, DialError::HandshakeIo { .. }));
    }

    #[test]
    fn test_socks4a_sends_host_name() {
        let mut stream = Scripted::new(&[0, SOCKS4_GRANTED, 0, 0, 0, 0, 0, 0]);
        socks4_handshake(&mut stream, &Socks4Target::Domain("example.com"), 80, "bob")
            .expect("granted");

        let mut expected = vec![4, 1, 0, 80, 0, 0, 0, 1];
        expected.extend_from_slice(b"bob\0example.com\0");
        assert_eq!(stream.written, expected);
    }

    #[test]
    fn test_socks4_rejection_codes() {
        let mut stream = Scripted::new(&[0, 0x5B, 0, 0, 0, 0, 0, 0]);
        let err = socks4_handshake(&mut stream, &Socks4Target::Ip(Ipv4Addr::LOCALHOST), 80, "")
            .expect_err("rejected");
        assert!(err.to_string().contains("rejected"));
    }
}
