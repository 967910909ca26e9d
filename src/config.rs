//! Configuration Module
//!
//! Handles loading server and client configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tracing::warn;

/// Default UDP port the server listens on.
pub const DEFAULT_PORT: u16 = 9876;

/// Default idle timeout for cache entries (5 minutes).
pub const DEFAULT_CACHE_TIMEOUT_MS: u64 = 300_000;

/// Default receive buffer size; longer datagrams are truncated.
pub const DEFAULT_MAX_DATAGRAM_SIZE: usize = 1024;

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "password";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address the server binds to
    pub bind_address: IpAddr,
    /// UDP server port
    pub server_port: u16,
    /// Idle timeout in milliseconds after which an untouched entry may be swept
    pub cache_timeout_ms: u64,
    /// Sweep interval in milliseconds, equal to the timeout unless overridden
    pub cleanup_interval_ms: u64,
    /// Receive buffer size in bytes
    pub max_datagram_size: usize,
    /// Username accepted by the static credential verifier
    pub auth_username: String,
    /// Password accepted by the static credential verifier
    pub auth_password: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BIND_ADDRESS` - IP to bind (default: 0.0.0.0)
    /// - `SERVER_PORT` - UDP port (default: 9876)
    /// - `CACHE_TIMEOUT_MS` - Idle timeout in milliseconds (default: 300000)
    /// - `CLEANUP_INTERVAL_MS` - Sweep interval in milliseconds (default: the timeout)
    /// - `MAX_DATAGRAM_SIZE` - Receive buffer size in bytes (default: 1024)
    /// - `AUTH_USERNAME` / `AUTH_PASSWORD` - Accepted credentials (default: admin/password)
    ///
    /// Zero durations and sizes fall back to the defaults. A sweep interval
    /// longer than the timeout is capped at the timeout.
    pub fn from_env() -> Self {
        let cache_timeout_ms = parse_var::<u64>("CACHE_TIMEOUT_MS")
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_CACHE_TIMEOUT_MS);

        Self {
            bind_address: parse_var("BIND_ADDRESS").unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_PORT),
            cache_timeout_ms,
            cleanup_interval_ms: cleanup_interval_or_default(
                parse_var::<u64>("CLEANUP_INTERVAL_MS"),
                cache_timeout_ms,
            ),
            max_datagram_size: parse_var::<usize>("MAX_DATAGRAM_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_MAX_DATAGRAM_SIZE),
            auth_username: env::var("AUTH_USERNAME").unwrap_or_else(|_| DEFAULT_USERNAME.into()),
            auth_password: env::var("AUTH_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.into()),
        }
    }

    /// Address the server socket binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.server_port)
    }

    /// Idle timeout as a Duration.
    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }

    /// Sweep interval as a Duration.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            server_port: DEFAULT_PORT,
            cache_timeout_ms: DEFAULT_CACHE_TIMEOUT_MS,
            cleanup_interval_ms: DEFAULT_CACHE_TIMEOUT_MS,
            max_datagram_size: DEFAULT_MAX_DATAGRAM_SIZE,
            auth_username: DEFAULT_USERNAME.to_string(),
            auth_password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

/// Client configuration for the demo client binary.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Address of the cache server
    pub server_addr: SocketAddr,
    /// Username sent in the AUTH request
    pub username: String,
    /// Password sent in the AUTH request
    pub password: String,
    /// How long to wait for each reply, in milliseconds
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Creates a new ClientConfig from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SERVER_ADDR` - Server address (default: 127.0.0.1:9876)
    /// - `AUTH_USERNAME` / `AUTH_PASSWORD` - Credentials (default: admin/password)
    /// - `CLIENT_TIMEOUT_MS` - Reply timeout in milliseconds (default: 5000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_addr: parse_var("CACHE_SERVER_ADDR").unwrap_or(defaults.server_addr),
            username: env::var("AUTH_USERNAME").unwrap_or(defaults.username),
            password: env::var("AUTH_PASSWORD").unwrap_or(defaults.password),
            timeout_ms: parse_var("CLIENT_TIMEOUT_MS").unwrap_or(defaults.timeout_ms),
        }
    }

    /// Reply timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Resolves the sweep interval: unset or zero means the timeout, and anything
/// longer than the timeout is capped so an idle entry outlives its deadline by
/// at most one sweep period.
fn cleanup_interval_or_default(configured: Option<u64>, cache_timeout_ms: u64) -> u64 {
    match configured.filter(|ms| *ms > 0) {
        Some(ms) if ms > cache_timeout_ms => {
            warn!(
                "CLEANUP_INTERVAL_MS={} exceeds CACHE_TIMEOUT_MS={}, using {}",
                ms, cache_timeout_ms, cache_timeout_ms
            );
            cache_timeout_ms
        }
        Some(ms) => ms,
        None => cache_timeout_ms,
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 9876);
        assert_eq!(config.cache_timeout_ms, 300_000);
        assert_eq!(config.cleanup_interval_ms, config.cache_timeout_ms);
        assert_eq!(config.max_datagram_size, 1024);
        assert_eq!(config.auth_username, "admin");
        assert_eq!(config.auth_password, "password");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("BIND_ADDRESS");
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_TIMEOUT_MS");
        env::remove_var("CLEANUP_INTERVAL_MS");
        env::remove_var("MAX_DATAGRAM_SIZE");

        let config = Config::from_env();
        assert_eq!(config.server_port, 9876);
        assert_eq!(config.cache_timeout(), Duration::from_secs(300));
        assert_eq!(config.cleanup_interval(), config.cache_timeout());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9876");
    }

    #[test]
    fn test_cleanup_interval_capped_at_timeout() {
        assert_eq!(cleanup_interval_or_default(Some(90_000), 60_000), 60_000);
        assert_eq!(cleanup_interval_or_default(Some(10_000), 60_000), 10_000);
        assert_eq!(cleanup_interval_or_default(Some(0), 60_000), 60_000);
        assert_eq!(cleanup_interval_or_default(None, 60_000), 60_000);
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.server_addr.to_string(), "127.0.0.1:9876");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
