//! Session Table
//!
//! Per-client authentication state keyed by source address and port.
//!
//! The key is whatever address the datagram arrived from, so a client behind
//! NAT or a proxy whose mapping changes shows up as a new, unauthenticated
//! session. Sessions are never removed: the table grows with every distinct
//! client address for the life of the process.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;

/// Authentication state of one client identity.
#[derive(Debug, Clone)]
pub struct Session {
    /// Once true, stays true
    pub authenticated: bool,
    /// When the first datagram from this identity arrived
    pub first_seen: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            authenticated: false,
            first_seen: Instant::now(),
        }
    }
}

/// Concurrent map of client identity to [`Session`].
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: RwLock<HashMap<SocketAddr, Session>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `client` has been seen and returns whether it is authenticated.
    ///
    /// Creates an unauthenticated session on first contact.
    pub async fn observe(&self, client: SocketAddr) -> bool {
        if let Some(session) = self.sessions.read().await.get(&client) {
            return session.authenticated;
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(client).or_insert_with(|| {
            info!("New session for {}", client);
            Session::new()
        });
        session.authenticated
    }

    /// Marks `client` as authenticated, creating the session if needed.
    ///
    /// Returns how long the client took to authenticate since first contact.
    pub async fn authenticate(&self, client: SocketAddr) -> Duration {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(client).or_insert_with(Session::new);
        session.authenticated = true;
        session.first_seen.elapsed()
    }

    pub async fn is_authenticated(&self, client: SocketAddr) -> bool {
        self.sessions
            .read()
            .await
            .get(&client)
            .is_some_and(|session| session.authenticated)
    }

    /// Number of known client identities.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Number of client identities that have authenticated.
    pub async fn authenticated_count(&self) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|session| session.authenticated)
            .count()
    }
}
