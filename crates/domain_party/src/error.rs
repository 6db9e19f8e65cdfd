//! Party domain errors

use thiserror::Error;

use core_kernel::{PortError, UserId};

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    #[error("A user with that username already exists.")]
    DuplicateUsername(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Unknown username or wrong password; the two are not distinguished
    #[error("No active account found with the given credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<PartyError> for PortError {
    fn from(err: PartyError) -> Self {
        match err {
            PartyError::DuplicateUsername(_) => PortError::conflict(err.to_string()),
            PartyError::UserNotFound(id) => PortError::not_found("User", id),
            PartyError::InvalidCredentials => PortError::unauthorized(err.to_string()),
            PartyError::Hashing(_) => PortError::internal(err.to_string()),
        }
    }
}

impl From<pbkdf2::password_hash::Error> for PartyError {
    fn from(err: pbkdf2::password_hash::Error) -> Self {
        PartyError::Hashing(err.to_string())
    }
}
