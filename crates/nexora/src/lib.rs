//! # Nexora
//!
//! A marketplace backend in one process. Each service of the marketplace is a
//! resource actor from [`nexora_actor`] with a typed client and an axum router:
//!
//! - **[model]**: plain data (users, products, carts, orders, payments, money).
//! - **[user_actor]**, **[product_actor]**, **[cart_actor]**, **[order_actor]**,
//!   **[payment_actor]**: the entities' business rules.
//! - **[clients]**: typed wrappers handlers and other actors call.
//! - **[notification]**: the event broker and the email service listening to it.
//! - **[dashboard]**: seller read model over products and orders.
//! - **[auth]**: password hashing, JWT sessions and logout denylist.
//! - **[http]**: routers, extractors and the JSON error mapping.
//! - **[lifecycle]**: starts, wires and stops everything; [`config`] feeds it.
//!
//! Tests for clients use [`nexora_actor::mock`] instead of live actors.

pub mod auth;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod http;
pub mod images;
pub mod lifecycle;
pub mod model;
pub mod notification;
pub mod order_actor;
pub mod payment_actor;
pub mod product_actor;
pub mod user_actor;
