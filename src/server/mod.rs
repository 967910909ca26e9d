//! Server Module
//!
//! Session-gated request handling over UDP.
//!
//! Datagrams carry no connection, so each source address and port is treated
//! as one client identity with its own authentication state and task.

pub mod dispatcher;
pub mod session;
pub mod transport;

pub use dispatcher::{Dispatcher, Outcome, Reply};
pub use session::{Session, SessionTable};
pub use transport::UdpCacheServer;
