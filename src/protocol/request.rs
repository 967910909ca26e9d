//! Request parsing
//!
//! Turns one datagram payload into a [`Request`]. Tokens are whitespace
//! separated and only the first three are meaningful, so values cannot
//! contain whitespace.

/// A parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `AUTH Basic <credentials>`
    Auth { credentials: String },
    /// Anything else
    Command(Command),
}

/// A cache command. Arguments are optional so that missing ones can be
/// reported with a command-specific error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Get { key: Option<String> },
    Set { key: Option<String>, value: Option<String> },
    Delete { key: Option<String> },
    /// Verb not recognised; carries the verb as sent
    Unknown(String),
    /// Blank payload
    Empty,
}

impl Request {
    /// Parses a request line.
    ///
    /// `AUTH` and `Basic` are matched case-insensitively. A line starting with
    /// `AUTH` that is not a complete `AUTH Basic <token>` parses as an unknown
    /// command, which an unauthenticated client sees as a failed AUTH.
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next();
        let first = tokens.next();
        let second = tokens.next();

        if let (Some(verb), Some(scheme), Some(token)) = (verb, first, second) {
            if verb.eq_ignore_ascii_case("AUTH") && scheme.eq_ignore_ascii_case("Basic") {
                return Request::Auth {
                    credentials: token.to_string(),
                };
            }
        }

        Request::Command(Command::from_tokens(verb, first, second))
    }

    /// The request as seen by an already authenticated client, for whom an
    /// AUTH line is just an unrecognised verb.
    pub fn into_command(self) -> Command {
        match self {
            Request::Auth { .. } => Command::Unknown("AUTH".to_string()),
            Request::Command(command) => command,
        }
    }
}

impl Command {
    fn from_tokens(verb: Option<&str>, first: Option<&str>, second: Option<&str>) -> Self {
        let Some(verb) = verb else {
            return Command::Empty;
        };
        let key = first.map(str::to_string);

        match verb.to_ascii_uppercase().as_str() {
            "GET" => Command::Get { key },
            "SET" => Command::Set {
                key,
                value: second.map(str::to_string),
            },
            "DELETE" => Command::Delete { key },
            _ => Command::Unknown(verb.to_string()),
        }
    }
}
