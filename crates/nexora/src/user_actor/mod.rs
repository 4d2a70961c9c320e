//! # User Actor
//!
//! Owns every account: credentials (bcrypt hashes only), role, and the address
//! book. Its context is the event [`Broker`](crate::notification::Broker), used to
//! announce new registrations.
//!
//! - [`entity`]: [`ActorEntity`](nexora_actor::ActorEntity) implementation for [`User`]
//! - [`error`]: [`UserError`]
//! - [`actions`]: address-book actions

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::User;
use nexora_actor::{ResourceActor, ResourceClient};

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::new(buffer_size)
}
