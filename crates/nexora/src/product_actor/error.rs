use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,

    #[error("Forbidden: You cannot update another seller's product")]
    ForbiddenUpdate,

    #[error("Forbidden: You cannot delete another seller's product")]
    ForbiddenDelete,

    /// The requested quantity exceeds the available stock.
    #[error("Product {title} is out of stock")]
    OutOfStock {
        title: String,
        requested: u32,
        available: u32,
    },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
