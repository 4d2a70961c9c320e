//! Error types for the User actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("No user found")]
    NotFound,

    /// Username or email already registered.
    #[error("User already exists!")]
    AlreadyExists,

    #[error("Address not found")]
    AddressNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
