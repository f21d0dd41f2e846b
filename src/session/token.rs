//! Session token formatting and parsing.

use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::directory::Role;

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "tba";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

/// Claims carried by a session token.
///
/// The encoding is reversible and unsigned. Claims are decoded for display
/// and for the expiry check only; nothing treats them as trust-authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identifier of this session, for log correlation.
    pub session_uuid: Uuid,

    pub user_id: String,
    pub email: String,
    pub role: Role,

    /// A token is live iff the current time is strictly before this instant.
    pub expires_at: Timestamp,

    /// Set on sessions issued by the emergency recovery fallback.
    #[serde(default)]
    pub recovery: bool,
}

impl SessionClaims {
    #[must_use]
    pub fn is_live(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token payload encoding is invalid")]
    InvalidEncoding,

    #[error("session token claims are invalid")]
    InvalidClaims(#[source] serde_json::Error),
}

/// Encode claims into the `tba_v1.<payload>` wire form.
///
/// # Errors
///
/// Returns an error when the claims cannot be serialized.
pub fn format_session_token(claims: &SessionClaims) -> Result<String, SessionTokenError> {
    let payload = serde_json::to_vec(claims).map_err(SessionTokenError::InvalidClaims)?;

    Ok(format!(
        "{SESSION_TOKEN_PREFIX}_{}.{}",
        SessionTokenVersion::V1.segment(),
        BASE64.encode(payload)
    ))
}

/// Decode a token back into its claims.
///
/// # Errors
///
/// Returns an error when the prefix, version, payload encoding or claims
/// shape is invalid.
pub fn parse_session_token(token: &str) -> Result<SessionClaims, SessionTokenError> {
    let (prefix_and_version, payload) = token
        .split_once('.')
        .ok_or(SessionTokenError::InvalidFormat)?;

    let (prefix, version_segment) = prefix_and_version
        .split_once('_')
        .ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    let _version = SessionTokenVersion::from_str(version_segment)?;

    let bytes = BASE64
        .decode(payload)
        .map_err(|_| SessionTokenError::InvalidEncoding)?;

    serde_json::from_slice(&bytes).map_err(SessionTokenError::InvalidClaims)
}
