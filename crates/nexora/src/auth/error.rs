use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Unauthorized, No token provided")]
    MissingToken,

    /// Malformed, expired, wrongly signed or logged out.
    #[error("Unauthorized: Invalid token")]
    InvalidToken,

    #[error("Forbidden: Insufficient permission")]
    InsufficientPermission,

    #[error("Token could not be issued: {0}")]
    Issue(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}
