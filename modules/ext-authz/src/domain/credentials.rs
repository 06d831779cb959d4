//! HTTP Basic credential extraction.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::SecretString;
use thiserror::Error;

/// Scheme prefix of the `authorization` header value. Case-sensitive.
pub const BASIC_PREFIX: &str = "Basic ";

/// Why an `authorization` header could not be turned into credentials.
///
/// Callers only ever see [`super::decision::BASIC_AUTH_REQUIRED`]; the
/// variants exist for logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedCredential {
    #[error("missing authorization header")]
    Missing,

    #[error("authorization scheme is not Basic")]
    NotBasic,

    #[error("credential is not valid base64")]
    InvalidBase64,

    #[error("expected exactly one ':' separator, found {segments} segments")]
    SegmentCount { segments: usize },

    #[error("credential is not valid UTF-8")]
    NotUtf8,
}

/// A username/password pair decoded from a single request.
///
/// Lives for one authorization decision. The password is a secret so that
/// `Debug` output and log fields never carry it.
pub struct CredentialAssertion {
    pub username: String,
    pub password: SecretString,
}

impl fmt::Debug for CredentialAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialAssertion")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Decode the value of an `authorization` header.
///
/// The decoded bytes must split on `:` into exactly two segments, so a
/// password that itself contains a colon is rejected.
///
/// # Errors
///
/// Returns [`MalformedCredential`] when the header is absent, uses another
/// scheme, is not padded standard base64, has the wrong number of segments,
/// or is not UTF-8.
pub fn parse_basic(header: Option<&str>) -> Result<CredentialAssertion, MalformedCredential> {
    let value = header.ok_or(MalformedCredential::Missing)?;
    let raw = value
        .strip_prefix(BASIC_PREFIX)
        .ok_or(MalformedCredential::NotBasic)?;

    let decoded = STANDARD
        .decode(raw)
        .map_err(|_| MalformedCredential::InvalidBase64)?;

    let segments: Vec<&[u8]> = decoded.split(|b| *b == b':').collect();
    let [username, password] = segments.as_slice() else {
        return Err(MalformedCredential::SegmentCount {
            segments: segments.len(),
        });
    };

    let username = std::str::from_utf8(username).map_err(|_| MalformedCredential::NotUtf8)?;
    let password = std::str::from_utf8(password).map_err(|_| MalformedCredential::NotUtf8)?;

    Ok(CredentialAssertion {
        username: username.to_owned(),
        password: SecretString::from(password.to_owned()),
    })
}
