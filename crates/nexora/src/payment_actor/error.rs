//! Error types for the Payment actor.

use crate::order_actor::OrderError;
use crate::user_actor::UserError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    /// No `PENDING` payment for the gateway order.
    #[error("Payment not found")]
    NotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Forbidden: You do not have access to this order")]
    Forbidden,

    #[error("Order is not awaiting payment")]
    OrderNotPayable,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
