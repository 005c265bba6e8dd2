//! In-process fake proxies for integration tests
//!
//! Each fake listens on `127.0.0.1`, records what clients asked for, grants
//! the request and then echoes the tunnelled bytes back.

#![allow(dead_code)]

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use proxydial_client::{Connection, RandomSource};

/// One request as seen by a fake proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
    pub target: String,
    /// SOCKS5 `user:pass`, SOCKS4 user id or the HTTP `Proxy-Authorization` value.
    pub credential: Option<String>,
}

#[derive(Clone, Copy)]
enum Kind {
    Socks5 { require_auth: bool },
    Socks4,
    Http { status: u16 },
}

/// A running fake proxy.
pub struct FakeProxy {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<Seen>>>,
    accepted: Arc<AtomicUsize>,
}

impl FakeProxy {
    pub fn socks5() -> Self {
        Self::start(Kind::Socks5 { require_auth: false })
    }

    /// Accepts only username/password authentication.
    pub fn socks5_with_auth() -> Self {
        Self::start(Kind::Socks5 { require_auth: true })
    }

    pub fn socks4() -> Self {
        Self::start(Kind::Socks4)
    }

    pub fn http() -> Self {
        Self::start(Kind::Http { status: 200 })
    }

    /// Answers every CONNECT with `status`.
    pub fn http_with_status(status: u16) -> Self {
        Self::start(Kind::Http { status })
    }

    pub fn url(&self, scheme: &str) -> String {
        format!("{scheme}://{}", self.addr)
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().expect("seen lock").clone()
    }

    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    fn start(kind: Kind) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake proxy");
        let addr = listener.local_addr().expect("fake proxy addr");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let accepted = Arc::new(AtomicUsize::new(0));

        let (seen_bg, accepted_bg) = (seen.clone(), accepted.clone());
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                accepted_bg.fetch_add(1, Ordering::SeqCst);
                let seen = seen_bg.clone();
                thread::spawn(move || {
                    let _ = serve(kind, stream, &seen);
                });
            }
        });

        Self { addr, seen, accepted }
    }
}

fn serve(kind: Kind, mut stream: TcpStream, seen: &Mutex<Vec<Seen>>) -> io::Result<()> {
    let granted = match kind {
        Kind::Socks5 { require_auth } => socks5(&mut stream, require_auth, seen)?,
        Kind::Socks4 => socks4(&mut stream, seen)?,
        Kind::Http { status } => http(&mut stream, status, seen)?,
    };
    if granted {
        echo(stream)?;
    }
    Ok(())
}

fn socks5(stream: &mut TcpStream, require_auth: bool, seen: &Mutex<Vec<Seen>>) -> io::Result<bool> {
    let mut head = [0u8; 2];
    stream.read_exact(&mut head)?;
    let mut methods = vec![0u8; usize::from(head[1])];
    stream.read_exact(&mut methods)?;

    let mut credential = None;
    if require_auth {
        if !methods.contains(&0x02) {
            stream.write_all(&[5, 0xFF])?;
            return Ok(false);
        }
        stream.write_all(&[5, 0x02])?;
        let mut ver_len = [0u8; 2];
        stream.read_exact(&mut ver_len)?;
        let mut user = vec![0u8; usize::from(ver_len[1])];
        stream.read_exact(&mut user)?;
        let mut pass_len = [0u8; 1];
        stream.read_exact(&mut pass_len)?;
        let mut pass = vec![0u8; usize::from(pass_len[0])];
        stream.read_exact(&mut pass)?;
        stream.write_all(&[1, 0])?;
        credential = Some(format!(
            "{}:{}",
            String::from_utf8_lossy(&user),
            String::from_utf8_lossy(&pass)
        ));
    } else {
        stream.write_all(&[5, 0x00])?;
    }

    let mut request = [0u8; 4];
    stream.read_exact(&mut request)?;
    let host = match request[3] {
        1 => {
            let mut ip = [0u8; 4];
            stream.read_exact(&mut ip)?;
            std::net::Ipv4Addr::from(ip).to_string()
        }
        4 => {
            let mut ip = [0u8; 16];
            stream.read_exact(&mut ip)?;
            format!("[{}]", std::net::Ipv6Addr::from(ip))
        }
        _ => {
            let mut len = [0u8; 1];
            stream.read_exact(&mut len)?;
            let mut name = vec![0u8; usize::from(len[0])];
            stream.read_exact(&mut name)?;
            String::from_utf8_lossy(&name).into_owned()
        }
    };
    let mut port = [0u8; 2];
    stream.read_exact(&mut port)?;
    record(seen, format!("{host}:{}", u16::from_be_bytes(port)), credential);

    stream.write_all(&[5, 0, 0, 1, 127, 0, 0, 1, 0, 0])?;
    Ok(true)
}

fn socks4(stream: &mut TcpStream, seen: &Mutex<Vec<Seen>>) -> io::Result<bool> {
    let mut request = [0u8; 8];
    stream.read_exact(&mut request)?;
    let port = u16::from_be_bytes([request[2], request[3]]);
    let ip = [request[4], request[5], request[6], request[7]];
    let user_id = read_nul_terminated(stream)?;
    let host = if ip[..3] == [0, 0, 0] && ip[3] != 0 {
        read_nul_terminated(stream)?
    } else {
        std::net::Ipv4Addr::from(ip).to_string()
    };
    record(seen, format!("{host}:{port}"), Some(user_id).filter(|u| !u.is_empty()));

    stream.write_all(&[0, 0x5A, 0, 0, 0, 0, 0, 0])?;
    Ok(true)
}

fn http(stream: &mut TcpStream, status: u16, seen: &Mutex<Vec<Seen>>) -> io::Result<bool> {
    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        if stream.read(&mut byte)? == 0 {
            return Ok(false);
        }
        head.push(byte[0]);
    }
    let head = String::from_utf8_lossy(&head).into_owned();
    let target = head
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("CONNECT "))
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or_default()
        .to_owned();
    let credential = head
        .lines()
        .find_map(|line| line.strip_prefix("Proxy-Authorization: "))
        .map(str::to_owned);
    record(seen, target, credential);

    let reason = if status == 200 { "Connection established" } else { "Nope" };
    stream.write_all(format!("HTTP/1.1 {status} {reason}\r\n\r\n").as_bytes())?;
    Ok(status == 200)
}

fn read_nul_terminated(stream: &mut TcpStream) -> io::Result<String> {
    let mut out = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        stream.read_exact(&mut byte)?;
        if byte[0] == 0 {
            return Ok(String::from_utf8_lossy(&out).into_owned());
        }
        out.push(byte[0]);
    }
}

fn record(seen: &Mutex<Vec<Seen>>, target: String, credential: Option<String>) {
    if let Ok(mut seen) = seen.lock() {
        seen.push(Seen { target, credential });
    }
}

fn echo(mut stream: TcpStream) -> io::Result<()> {
    let mut buf = [0u8; 1024];
    loop {
        let n = stream.read(&mut buf)?;
        if n == 0 {
            return Ok(());
        }
        stream.write_all(&buf[..n])?;
    }
}

/// Plain echo server for direct dials.
pub fn echo_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind echo server");
    let addr = listener.local_addr().expect("echo server addr");
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || {
                let _ = echo(stream);
            });
        }
    });
    addr
}

/// Write `payload` and expect it echoed back.
pub fn assert_echo(conn: &mut Connection, payload: &[u8]) {
    conn.write_all(payload).expect("write through tunnel");
    let mut buf = vec![0u8; payload.len()];
    conn.read_exact(&mut buf).expect("read echo through tunnel");
    assert_eq!(buf, payload);
}

/// Random source returning a fixed sequence of indices, cycling.
pub struct Sequence {
    values: Vec<usize>,
    next: AtomicUsize,
}

impl Sequence {
    pub fn new(values: &[usize]) -> Self {
        Self {
            values: values.to_vec(),
            next: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for Sequence {
    fn index(&self, _len: usize) -> usize {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.values[i % self.values.len()]
    }
}

/// A TCP port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let port = listener.local_addr().expect("probe addr").port();
    drop(listener);
    port
}
