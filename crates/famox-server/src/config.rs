//! Server configuration.
//!
//! Loads from environment variables with sensible defaults. Provider settings
//! (demo mode, storage, admin password) come from
//! [`ProviderConfig::from_lookup`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::bail;
use famox_core::config::ProviderConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Which data provider to serve.
    pub provider: ProviderConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PORT`: port to bind on (binds to `0.0.0.0`, PaaS convention)
    /// - `FAMOX_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:8300`)
    /// - `FAMOX_LOG_LEVEL`: log filter (default: `info`)
    /// - plus every `FAMOX_*` provider variable
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_lookup`].
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Fails when the provider is remote and `FAMOX_API_URL` points back at
    /// this server's own listener, which would make every request call itself.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let default_addr = SocketAddr::from(([127, 0, 0, 1], 8300));

        // FAMOX_BIND_ADDR > PORT > default
        let bind_addr = if let Some(addr) = lookup("FAMOX_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port) = lookup("PORT") {
            SocketAddr::from(([0, 0, 0, 0], port.parse().unwrap_or(8300)))
        } else {
            default_addr
        };

        let log_level = lookup("FAMOX_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());
        let provider = ProviderConfig::from_lookup(&lookup);

        if !provider.demo_mode && routes_to(&provider.api_url, bind_addr) {
            bail!(
                "FAMOX_API_URL ({}) points at this server's own address {bind_addr}; \
                 set FAMOX_DEMO_MODE=1 or point FAMOX_API_URL at another API",
                provider.api_url
            );
        }

        Ok(Self {
            bind_addr,
            log_level,
            provider,
        })
    }
}

/// Whether requests to `url` would reach a listener bound to `bind`.
///
/// Only literal IPs and `localhost` are compared. Other host names are
/// assumed to be elsewhere.
fn routes_to(url: &str, bind: SocketAddr) -> bool {
    let (scheme, rest) = url.split_once("://").unwrap_or(("http", url));
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let authority = authority.rsplit_once('@').map_or(authority, |(_, a)| a);

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) if !port.contains(']') => {
            let Ok(port) = port.parse::<u16>() else {
                return false;
            };
            (host, port)
        }
        _ if scheme.eq_ignore_ascii_case("https") => (authority, 443),
        _ => (authority, 80),
    };
    if port != bind.port() {
        return false;
    }

    let host = host.trim_start_matches('[').trim_end_matches(']');
    let ip = if host.eq_ignore_ascii_case("localhost") {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    } else if let Ok(ip) = host.parse::<IpAddr>() {
        ip
    } else {
        return false;
    };

    let bound = bind.ip();
    ip == bound
        || (bound.is_unspecified() && (ip.is_loopback() || ip.is_unspecified()))
        || (bound.is_loopback() && ip.is_loopback())
}
