//! # Marketplace Lifecycle
//!
//! Starting, wiring and stopping every actor in the process.
//!
//! ## Wiring
//!
//! ```text
//! user     ctx: Broker
//! product  ctx: ()
//! cart     ctx: ()
//! order    ctx: (CartClient, ProductClient)
//! payment  ctx: PaymentContext { OrderClient, UserClient, gateway, Broker, secret }
//! notification service: subscribed to the Broker
//! ```
//!
//! The dependency graph is acyclic, so closing channels is enough to stop
//! everything: once the [`Marketplace`] drops its clients the payment actor
//! exits and releases its order and user clients, which lets those actors exit,
//! and so on down the graph. The notification service stops last, when the
//! final [`Broker`](crate::notification::Broker) handle is gone.

pub mod marketplace;

pub use marketplace::*;
