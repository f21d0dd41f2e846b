//! Auth service errors.

use thiserror::Error;

use crate::{
    directory::DirectoryError,
    session::{SessionTokenError, StorageError},
};

/// Authentication and session errors.
///
/// Callers surface `InvalidCredentials`, `AccountInactive` and `NotEligible`
/// as one generic failure message so account existence cannot be probed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email and password are required")]
    InvalidInput,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account is deactivated")]
    AccountInactive,

    #[error("account is not eligible for recovery")]
    NotEligible,

    #[error("user directory is unavailable")]
    DirectoryUnavailable(#[from] DirectoryError),

    #[error("session token processing error")]
    Token(#[from] SessionTokenError),

    #[error("session storage error")]
    Storage(#[from] StorageError),

    #[error("session expiry computation failed")]
    Expiry(#[source] jiff::Error),
}
