//! # Typed Clients
//!
//! One wrapper per actor. Each turns `FrameworkError` back into the resource's
//! own error type so handlers never see framework plumbing.

pub mod cart_client;
pub mod order_client;
pub mod payment_client;
pub mod product_client;
pub mod user_client;

pub use cart_client::CartClient;
pub use nexora_actor::ActorClient;
pub use order_client::OrderClient;
pub use payment_client::{PaymentClient, VerifyPayment};
pub use product_client::ProductClient;
pub use user_client::UserClient;

use nexora_actor::FrameworkError;

/// Recovers a typed entity error; `NotFound` maps to `not_found`, anything
/// else becomes a communication error.
pub(crate) fn classify<E>(
    e: FrameworkError,
    not_found: E,
    communication: impl FnOnce(String) -> E,
) -> E
where
    E: std::error::Error + Send + Sync + 'static,
{
    match e.downcast_entity::<E>() {
        Ok(typed) => typed,
        Err(FrameworkError::NotFound(_)) => not_found,
        Err(other) => communication(other.to_string()),
    }
}
