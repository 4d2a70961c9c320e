//! # Cart Actor
//!
//! One cart per shopper, keyed by the shopper's ID and created lazily on first
//! access. Quantities are validated at the HTTP edge; the actor only edits lines.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Cart;
use nexora_actor::{ResourceActor, ResourceClient};

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
