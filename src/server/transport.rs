//! Datagram Transport
//!
//! Receives datagrams on one UDP socket and fans them out to one task per
//! client identity. Each task answers every datagram it receives with exactly
//! one datagram.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::server::dispatcher::{Dispatcher, Outcome};

type Datagram = Vec<u8>;

/// UDP front end of the cache server.
pub struct UdpCacheServer {
    socket: Arc<UdpSocket>,
    dispatcher: Dispatcher,
    max_datagram_size: usize,
    /// Inbox of the task currently servicing each client identity
    clients: HashMap<SocketAddr, mpsc::UnboundedSender<Datagram>>,
}

impl UdpCacheServer {
    /// Binds the server socket. Failure here is fatal to the process.
    pub async fn bind(config: &Config, dispatcher: Dispatcher) -> Result<Self> {
        let addr = config.socket_addr();
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self {
            socket: Arc::new(socket),
            dispatcher,
            max_datagram_size: config.max_datagram_size,
            clients: HashMap::new(),
        })
    }

    /// Address the socket is actually bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receives datagrams forever.
    ///
    /// Receive errors are logged and skipped; they never stop the server.
    pub async fn run(mut self) -> Result<()> {
        info!("Cache server listening on udp://{}", self.local_addr()?);
        let mut buffer = vec![0u8; self.max_datagram_size];

        loop {
            let (len, client) = match self.socket.recv_from(&mut buffer).await {
                Ok(received) => received,
                Err(err) => {
                    warn!("Failed to receive datagram: {}", err);
                    continue;
                }
            };
            debug!("Received {} bytes from {}", len, client);
            self.route(client, buffer[..len].to_vec());
        }
    }

    /// Hands a datagram to the task for `client`, spawning one if the client
    /// is new or its previous task has stopped.
    fn route(&mut self, client: SocketAddr, datagram: Datagram) {
        let datagram = match self.clients.get(&client) {
            Some(inbox) => match inbox.send(datagram) {
                Ok(()) => return,
                Err(mpsc::error::SendError(datagram)) => datagram,
            },
            None => datagram,
        };

        let (inbox, rx) = mpsc::unbounded_channel();
        // A freshly created receiver cannot be closed yet
        let _ = inbox.send(datagram);
        self.clients.insert(client, inbox);

        tokio::spawn(serve_client(
            client,
            rx,
            self.socket.clone(),
            self.dispatcher.clone(),
        ));
    }
}

/// Services one client identity until its inbox closes.
///
/// After a rejected AUTH the inbox is closed: datagrams already queued are
/// still answered, each judged afresh against the session table, and any
/// later datagram is routed to a new task.
async fn serve_client(
    client: SocketAddr,
    mut rx: mpsc::UnboundedReceiver<Datagram>,
    socket: Arc<UdpSocket>,
    dispatcher: Dispatcher,
) {
    debug!("Client task started for {}", client);

    while let Some(datagram) = rx.recv().await {
        let line = String::from_utf8_lossy(&datagram);
        let reply = dispatcher.handle(client, &line).await;
        if reply.outcome == Outcome::Close {
            rx.close();
        }

        let payload = reply.response.to_string();
        if let Err(err) = socket.send_to(payload.as_bytes(), client).await {
            error!("Failed to send reply to {}: {}", client, err);
            return;
        }
    }

    debug!("Client task finished for {}", client);
}
