//! Authentication Module
//!
//! Decodes `Basic` credentials and checks them against a [`CredentialVerifier`].

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::prelude::BASE64_STANDARD;
use base64::Engine;

use crate::config::Config;
use crate::error::AuthError;
use crate::protocol::Request;

/// Decides whether a username/password pair is allowed in.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Verifier accepting a single configured username/password pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.auth_username.clone(), config.auth_password.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Standard alphabet, `=` padding optional on decode.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes `username:password` as standard base64.
pub fn encode_basic(username: &str, password: &str) -> String {
    BASE64_STANDARD.encode(format!("{username}:{password}"))
}

/// Decodes a base64 `username:password` token.
///
/// Padding is optional. Trailing empty fields are dropped before splitting is
/// judged, so `admin:password:` is accepted while `admin:` (no password) and
/// `a:b:c` are rejected.
pub fn decode_basic(token: &str) -> Result<(String, String), AuthError> {
    let decoded = LENIENT_STANDARD
        .decode(token)
        .map_err(|_| AuthError::InvalidEncoding)?;
    let credentials = String::from_utf8(decoded).map_err(|_| AuthError::InvalidUtf8)?;

    let mut parts: Vec<&str> = credentials.split(':').collect();
    while parts.len() > 1 && parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    match parts.as_slice() {
        [username, password] => Ok((username.to_string(), password.to_string())),
        _ => Err(AuthError::MissingSeparator),
    }
}

/// Checks a parsed AUTH request, returning the authenticated username.
///
/// Any request other than `AUTH Basic <token>` is a [`AuthError::MalformedRequest`].
pub fn authenticate(
    request: &Request,
    verifier: &dyn CredentialVerifier,
) -> Result<String, AuthError> {
    let Request::Auth { credentials } = request else {
        return Err(AuthError::MalformedRequest);
    };

    let (username, password) = decode_basic(credentials)?;
    if verifier.verify(&username, &password) {
        Ok(username)
    } else {
        Err(AuthError::InvalidCredentials(username))
    }
}
