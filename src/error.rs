//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use std::net::SocketAddr;

use thiserror::Error;

// == Server Error Enum ==
/// Transport and lifecycle errors for the server and client.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The listening socket could not be bound; fatal at startup
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Socket send or receive failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No reply arrived before the client deadline
    #[error("Timed out waiting for a reply from the server")]
    ClientTimeout,
}

// == Auth Error Enum ==
/// Reasons an AUTH attempt is refused.
///
/// Every variant is reported to the client as `ERROR: Unauthorized`; the
/// distinction only shows up in the server logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Not an `AUTH Basic <token>` line
    #[error("Request is not an AUTH Basic request")]
    MalformedRequest,

    /// The token is not valid base64
    #[error("Credentials are not valid base64")]
    InvalidEncoding,

    /// The decoded token is not UTF-8
    #[error("Credentials are not valid UTF-8")]
    InvalidUtf8,

    /// The decoded token is not exactly `username:password`
    #[error("Credentials are not in username:password form")]
    MissingSeparator,

    /// Well-formed credentials that the verifier rejected
    #[error("Invalid credentials for user '{0}'")]
    InvalidCredentials(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, ServerError>;
