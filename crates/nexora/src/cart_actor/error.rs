use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found")]
    NotFound,

    #[error("Product not found in cart")]
    ItemNotFound,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
