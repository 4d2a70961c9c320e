//! Error types for the Order actor.

use crate::cart_actor::CartError;
use crate::model::OrderStatus;
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,

    /// The order belongs to someone else.
    #[error("Forbidden: You do not have access to this order")]
    Forbidden,

    #[error("Cart is empty")]
    EmptyCart,

    /// Cart lines are priced in more than one currency.
    #[error("All items in an order must share one currency")]
    MixedCurrency,

    #[error("Your order cannot be cancelled at this stage")]
    CannotCancel,

    #[error("Order address cannot be updated at this stage")]
    CannotUpdateAddress,

    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Stock check failures and unknown products while pricing the cart.
    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
