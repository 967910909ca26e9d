//! Wire Protocol Module
//!
//! One UTF-8 text line per datagram in each direction.
//!
//! | Request | Reply |
//! |---|---|
//! | `AUTH Basic <base64(user:pass)>` | `OK` / `ERROR: Unauthorized` |
//! | `GET <key>` | value / `NOT FOUND` |
//! | `SET <key> <value>` | `OK` |
//! | `DELETE <key>` | `OK` |

pub mod request;
pub mod response;

pub use request::{Command, Request};
pub use response::{ProtocolError, Response};
