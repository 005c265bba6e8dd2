mod common;

use common::{FakeProxy, assert_echo, echo_server};
use proxydial_client::{DialFactory, DialParams, EnvironmentResolver};

#[test]
fn test_all_proxy_socks5_is_used_without_pool() {
    let proxy = FakeProxy::socks5();
    let resolver = EnvironmentResolver::with_values(Some(proxy.url("socks5h").as_str()), None);
    let dial = DialFactory::new()
        .with_default_resolver(resolver)
        .build(DialParams::default());

    let mut conn = dial("tcp", "example.com:80").expect("dial through ALL_PROXY");
    assert_echo(&mut conn, b"env");
    assert_eq!(proxy.seen()[0].target, "example.com:80");
}

#[test]
fn test_no_proxy_targets_go_direct() {
    let proxy = FakeProxy::socks5();
    let echo = echo_server();
    let resolver = EnvironmentResolver::with_values(
        Some(proxy.url("socks5").as_str()),
        Some("10.0.0.0/8, 127.0.0.1, *.corp.example"),
    );
    let dial = DialFactory::new()
        .with_default_resolver(resolver)
        .build(DialParams::default());

    let mut conn = dial("tcp", &echo.to_string()).expect("bypassed dial");
    assert_echo(&mut conn, b"direct");
    assert_eq!(proxy.accepted(), 0);

    dial("tcp", "public.example:443").expect("proxied dial");
    assert_eq!(proxy.seen().len(), 1);
}

#[test]
fn test_non_socks_all_proxy_is_ignored() {
    let proxy = FakeProxy::http();
    let echo = echo_server();
    let resolver = EnvironmentResolver::with_values(Some(proxy.url("http").as_str()), None);
    let dial = DialFactory::new()
        .with_default_resolver(resolver)
        .build(DialParams::default());

    let mut conn = dial("tcp", &echo.to_string()).expect("direct dial");
    assert_echo(&mut conn, b"direct");
    assert_eq!(proxy.accepted(), 0);
}

#[test]
fn test_explicit_pool_ignores_environment() {
    let (env_proxy, pool_proxy) = (FakeProxy::socks5(), FakeProxy::socks5());
    let resolver = EnvironmentResolver::with_values(Some(env_proxy.url("socks5").as_str()), None);
    let dial = DialFactory::new()
        .with_default_resolver(resolver)
        .build(DialParams::new(pool_proxy.url("socks5")));

    dial("tcp", "example.com:80").expect("dial through pool");
    assert_eq!(pool_proxy.seen().len(), 1);
    assert_eq!(env_proxy.accepted(), 0);
}
