//! Response formatting
//!
//! Every request line produces exactly one [`Response`], rendered to the
//! wire through its `Display` impl.

use std::fmt;

/// A reply to one request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `OK`
    Ok,
    /// `NOT FOUND`, the wire form of an absent key
    NotFound,
    /// A stored value, sent verbatim
    Value(String),
    /// `ERROR: <reason>`
    Error(ProtocolError),
}

/// Client-visible error reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    Unauthorized,
    MissingGetKey,
    MissingSetArgs,
    MissingDeleteKey,
    UnknownCommand,
    InvalidFormat,
}

impl ProtocolError {
    fn reason(self) -> &'static str {
        match self {
            ProtocolError::Unauthorized => "Unauthorized",
            ProtocolError::MissingGetKey => "Key not provided for GET",
            ProtocolError::MissingSetArgs => "Key or Value not provided for SET",
            ProtocolError::MissingDeleteKey => "Key not provided for DELETE",
            ProtocolError::UnknownCommand => "Unknown command",
            ProtocolError::InvalidFormat => "Invalid request format",
        }
    }
}

impl From<ProtocolError> for Response {
    fn from(err: ProtocolError) -> Self {
        Response::Error(err)
    }
}

impl From<Option<String>> for Response {
    fn from(value: Option<String>) -> Self {
        value.map_or(Response::NotFound, Response::Value)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ok => f.write_str("OK"),
            Response::NotFound => f.write_str("NOT FOUND"),
            Response::Value(value) => f.write_str(value),
            Response::Error(err) => write!(f, "ERROR: {}", err.reason()),
        }
    }
}
