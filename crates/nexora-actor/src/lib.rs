//! # Nexora Actor Engine
//!
//! Each marketplace resource (users, products, carts, orders, payments) lives in
//! its own actor: a Tokio task that owns an in-memory store and handles one
//! message at a time. Callers never share the store; they send requests through a
//! cloneable [`ResourceClient`] and await the reply.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the resource's data and business rules.
//! 2. **Runtime** ([`ResourceActor`]): the message loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed request/reply.
//!
//! Every request is one of Create, Get, Update, Delete, Action or Query. Anything
//! resource-specific (adding a cart line, confirming an order) is an `Action`.
//!
//! ```rust
//! use nexora_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Wishlist { id: u32, items: Vec<String> }
//!
//! #[derive(Debug)] struct WishlistCreate;
//! #[derive(Debug)] struct WishlistUpdate;
//! #[derive(Debug)] enum WishlistAction { Add(String) }
//! #[derive(Debug, thiserror::Error)] #[error("wishlist error")] struct WishlistError;
//!
//! #[async_trait]
//! impl ActorEntity for Wishlist {
//!     type Id = u32;
//!     type Create = WishlistCreate;
//!     type Update = WishlistUpdate;
//!     type Action = WishlistAction;
//!     type ActionResult = usize;
//!     type Context = ();
//!     type Error = WishlistError;
//!
//!     fn from_create_params(id: u32, _: WishlistCreate) -> Result<Self, WishlistError> {
//!         Ok(Self { id, items: Vec::new() })
//!     }
//!
//!     async fn on_update(&mut self, _: WishlistUpdate, _: &()) -> Result<(), WishlistError> { Ok(()) }
//!
//!     async fn handle_action(&mut self, action: WishlistAction, _: &()) -> Result<usize, WishlistError> {
//!         match action {
//!             WishlistAction::Add(item) => self.items.push(item),
//!         }
//!         Ok(self.items.len())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Wishlist>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(WishlistCreate).await.unwrap();
//!     let len = client.perform_action(id, WishlistAction::Add("kurta".into())).await.unwrap();
//!     assert_eq!(len, 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`], not to `new()`. All actors are
//! created first, then each is started with the clients it needs: the order actor
//! runs with the cart and product clients, the payment actor with the order client.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted expectations,
//! so an actor's hooks can be tested against mocked neighbours.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
