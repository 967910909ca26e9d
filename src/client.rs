//! Cache Client
//!
//! Async UDP client speaking the cache's line protocol: one request datagram,
//! one reply datagram.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use tracing::debug;

use crate::auth::encode_basic;
use crate::config::DEFAULT_MAX_DATAGRAM_SIZE;
use crate::error::{Result, ServerError};

/// UDP client bound to an ephemeral local port.
///
/// The server keys sessions on the client's address, so one `CacheClient`
/// is one session; authenticate once and reuse it.
#[derive(Debug)]
pub struct CacheClient {
    socket: UdpSocket,
    server: SocketAddr,
    timeout: Duration,
}

impl CacheClient {
    /// Binds a local socket and points it at `server`.
    pub async fn connect(server: SocketAddr, timeout: Duration) -> Result<Self> {
        let unspecified = if server.is_ipv4() {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V6(Ipv6Addr::UNSPECIFIED)
        };
        let local = SocketAddr::new(unspecified, 0);
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|source| ServerError::Bind {
                addr: local,
                source,
            })?;
        socket.connect(server).await?;

        Ok(Self {
            socket,
            server,
            timeout,
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Sends one request line and waits for its reply.
    ///
    /// Lost datagrams are not retried; the call fails with
    /// [`ServerError::ClientTimeout`] instead.
    pub async fn request(&self, line: &str) -> Result<String> {
        debug!("Sending request: {}", redact(line));
        self.socket.send(line.as_bytes()).await?;

        let mut buffer = vec![0u8; DEFAULT_MAX_DATAGRAM_SIZE];
        let len = tokio::time::timeout(self.timeout, self.socket.recv(&mut buffer))
            .await
            .map_err(|_| ServerError::ClientTimeout)??;

        let reply = String::from_utf8_lossy(&buffer[..len]).into_owned();
        debug!("Received reply: {}", reply);
        Ok(reply)
    }

    /// Sends `AUTH Basic` for the given credentials; true when the server says `OK`.
    pub async fn auth(&self, username: &str, password: &str) -> Result<bool> {
        let line = format!("AUTH Basic {}", encode_basic(username, password));
        Ok(self.request(&line).await? == "OK")
    }

    pub async fn get(&self, key: &str) -> Result<String> {
        self.request(&format!("GET {key}")).await
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<String> {
        self.request(&format!("SET {key} {value}")).await
    }

    pub async fn delete(&self, key: &str) -> Result<String> {
        self.request(&format!("DELETE {key}")).await
    }
}

/// Hides the credential token of an AUTH line.
fn redact(line: &str) -> &str {
    let is_auth = line
        .get(..4)
        .is_some_and(|verb| verb.eq_ignore_ascii_case("AUTH"));
    if is_auth {
        "AUTH Basic <redacted>"
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_hides_credentials() {
        assert_eq!(redact("AUTH Basic YWRtaW46cGFzc3dvcmQ="), "AUTH Basic <redacted>");
        assert_eq!(redact("GET key1"), "GET key1");
        assert_eq!(redact("AU"), "AU");
    }

    #[tokio::test]
    async fn test_request_times_out_without_server() {
        // A bound socket that never replies
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = silent.local_addr().unwrap();

        let client = CacheClient::connect(addr, Duration::from_millis(100))
            .await
            .unwrap();
        let result = client.get("key1").await;
        assert!(matches!(result, Err(ServerError::ClientTimeout)));
        drop(silent);
    }
}
