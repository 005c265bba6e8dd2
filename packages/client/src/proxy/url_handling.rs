//! Proxy URL helpers
//!
//! Address extraction, credential decoding, redaction for logs and errors,
//! and the Go-style durations accepted in SOCKS4 URL query strings.

use std::time::Duration;

use url::Url;

use crate::addr::join_host_port;

/// The URL as text with any password replaced by `xxxxx`.
#[must_use]
pub fn redact(url: &Url) -> String {
    if url.password().is_none() {
        return url.to_string();
    }
    let mut redacted = url.clone();
    match redacted.set_password(Some("xxxxx")) {
        Ok(()) => redacted.to_string(),
        Err(()) => format!("{}://{}", url.scheme(), authority(url)),
    }
}

/// `host:port` of the proxy, falling back to `default_port`.
#[must_use]
pub fn proxy_address(url: &Url, default_port: u16) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some(join_host_port(host, url.port().unwrap_or(default_port)))
}

/// Host and port as written in the URL authority.
///
/// The scheme's well-known port is filled back in when the URL parser elided
/// it (`ftp://h:21` gives `h:21`). With no port at all only the host is returned.
#[must_use]
pub fn authority(url: &Url) -> String {
    let Some(host) = url.host_str() else {
        return String::new();
    };
    match url.port_or_known_default() {
        Some(port) => join_host_port(host, port),
        None => host.to_owned(),
    }
}

/// Percent-decoded user info, `None` when the URL carries none.
///
/// # Errors
///
/// Returns a description when the user info is not valid UTF-8 once decoded.
pub fn credentials(url: &Url) -> Result<Option<(String, String)>, String> {
    if url.username().is_empty() && url.password().is_none() {
        return Ok(None);
    }
    let username = urlencoding::decode(url.username())
        .map_err(|e| format!("invalid username encoding: {e}"))?
        .into_owned();
    let password = match url.password() {
        Some(p) => urlencoding::decode(p)
            .map_err(|e| format!("invalid password encoding: {e}"))?
            .into_owned(),
        None => String::new(),
    };
    Ok(Some((username, password)))
}

/// First value of a query parameter.
#[must_use]
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Parse durations such as `300ms`, `1.5s` or `1h2m`.
#[must_use]
pub fn parse_duration(text: &str) -> Option<Duration> {
    if text == "0" {
        return Some(Duration::ZERO);
    }
    let mut rest = text;
    let mut total_nanos = 0f64;
    if rest.is_empty() {
        return None;
    }
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return None;
        }
        let value: f64 = rest[..number_len].parse().ok()?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return None,
        };
        rest = &rest[unit_len..];
        total_nanos += value * scale;
    }
    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(Duration::from_nanos(total_nanos.round() as u64))
}
