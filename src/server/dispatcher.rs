//! Request Dispatcher
//!
//! Gates every request on the sender's session state, then executes cache
//! commands for authenticated clients.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::auth::{self, CredentialVerifier};
use crate::cache::SharedCache;
use crate::protocol::{Command, ProtocolError, Request, Response};
use crate::server::session::SessionTable;

/// What the client task should do after replying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep servicing this client
    Continue,
    /// Authentication failed; stop servicing this handling path
    Close,
}

/// The single reply to one request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub response: Response,
    pub outcome: Outcome,
}

impl Reply {
    fn proceed(response: Response) -> Self {
        Self {
            response,
            outcome: Outcome::Continue,
        }
    }

    fn unauthorized() -> Self {
        Self {
            response: ProtocolError::Unauthorized.into(),
            outcome: Outcome::Close,
        }
    }
}

/// Routes request lines to authentication or cache commands.
///
/// Cheap to clone; every clone shares the same cache, sessions and verifier.
#[derive(Clone)]
pub struct Dispatcher {
    cache: SharedCache,
    sessions: Arc<SessionTable>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl Dispatcher {
    pub fn new(
        cache: SharedCache,
        sessions: Arc<SessionTable>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            cache,
            sessions,
            verifier,
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn sessions(&self) -> &Arc<SessionTable> {
        &self.sessions
    }

    /// Handles one request line from `client`.
    ///
    /// An unauthenticated client may only send a valid AUTH line; anything
    /// else is answered with `ERROR: Unauthorized` and never reaches the
    /// cache. Once authenticated, every line is treated as a command,
    /// including further AUTH lines.
    pub async fn handle(&self, client: SocketAddr, line: &str) -> Reply {
        let request = Request::parse(line);
        if self.sessions.observe(client).await {
            return Reply::proceed(self.execute(request.into_command()).await);
        }

        match auth::authenticate(&request, self.verifier.as_ref()) {
            Ok(username) => {
                let waited = self.sessions.authenticate(client).await;
                info!(
                    "Client {} authenticated as '{}' {:?} after first contact",
                    client, username, waited
                );
                Reply::proceed(Response::Ok)
            }
            Err(err) => {
                warn!("Rejected unauthenticated request from {}: {}", client, err);
                Reply::unauthorized()
            }
        }
    }

    /// Executes a cache command and builds its response.
    pub async fn execute(&self, command: Command) -> Response {
        debug!("Executing {:?}", command);

        match command {
            Command::Get { key: Some(key) } => self.cache.write().await.get(&key).into(),
            Command::Get { key: None } => ProtocolError::MissingGetKey.into(),
            Command::Set {
                key: Some(key),
                value: Some(value),
            } => {
                self.cache.write().await.set(key, value);
                Response::Ok
            }
            Command::Set { .. } => ProtocolError::MissingSetArgs.into(),
            Command::Delete { key: Some(key) } => {
                self.cache.write().await.delete(&key);
                Response::Ok
            }
            Command::Delete { key: None } => ProtocolError::MissingDeleteKey.into(),
            Command::Unknown(_) => ProtocolError::UnknownCommand.into(),
            Command::Empty => ProtocolError::InvalidFormat.into(),
        }
    }
}
