//! # Order Actor
//!
//! Orders are priced from the owner's cart when they are created: every line is
//! stock-checked against the product actor and the order total is the sum of
//! line totals. Stock is checked, never reserved.
//!
//! ```text
//! create(OrderCreate)
//!   └─► on_create ─► cart_client.get(user)      (empty ─► EmptyCart)
//!                 └─► product_client.check_stock per line
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use nexora_actor::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
