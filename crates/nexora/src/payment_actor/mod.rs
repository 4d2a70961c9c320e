//! # Payment Actor
//!
//! A payment is opened against a `PENDING` order: `on_create` loads the order
//! through the order actor and asks the [`PaymentGateway`] for a gateway order
//! worth the total in minor units. Verification checks the checkout signature,
//! confirms the order, completes the payment and publishes the outcome on the
//! broker.

pub mod actions;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod signature;

pub use actions::*;
pub use entity::PaymentContext;
pub use error::*;
pub use gateway::{GatewayError, GatewayOrder, PaymentGateway, RazorpayGateway, SandboxGateway};

use crate::model::Payment;
use nexora_actor::{ResourceActor, ResourceClient};

/// Creates a new Payment actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Payment>, ResourceClient<Payment>) {
    ResourceActor::new(buffer_size)
}
