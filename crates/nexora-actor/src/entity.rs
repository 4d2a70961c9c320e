//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every marketplace resource (user, product,
//! cart, order, payment) implements to be managed by the generic `ResourceActor`.
//! It names the associated types for IDs, DTOs, actions, context and errors, and
//! provides the lifecycle hooks the actor calls while it owns the entity.
//!
//! # Provided Methods (Hooks)
//! These hooks have default implementations and only need overriding when an
//! entity cares about them:
//! - [`ActorEntity::natural_id`]
//! - [`ActorEntity::conflicts_with`]
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks can await other actors. The `Context`
/// associated type is injected into every hook, which lets dependencies be bound
/// late (passed to `run()` instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation, and ordered so
    /// that the store iterates in creation order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g. `CheckStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: clients match on a single
    /// `OrderError`, even though a given action can only produce some variants.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// An ID derived from the payload itself (a cart is keyed by its owner).
    ///
    /// When this returns `Some`, the actor uses it instead of its counter and
    /// rejects the create with `Conflict` if the ID is already taken.
    fn natural_id(_params: &Self::Create) -> Option<Self::Id> {
        None
    }

    /// Uniqueness rule checked against every stored entity before `on_create`.
    ///
    /// Runs inside the actor loop, so two concurrent creates cannot both pass.
    fn conflicts_with(&self, _existing: &Self) -> bool {
        false
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    /// Use this hook for validation or side effects that need other actors.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
