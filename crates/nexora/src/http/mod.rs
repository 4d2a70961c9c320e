//! # HTTP Surface
//!
//! One axum router per service, nested under the service's prefix:
//!
//! | prefix | module |
//! |---|---|
//! | `/api/auth` | [`auth`] |
//! | `/api/products` | [`products`] |
//! | `/api/cart` | [`cart`] |
//! | `/api/orders` | [`orders`] |
//! | `/api/payments` | [`payments`] |
//! | `/api/seller/dashboard` | [`dashboard`] |
//!
//! Handlers validate the body, call a typed client and render JSON. Errors go
//! through [`ApiError`].

pub mod auth;
pub mod cart;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod orders;
pub mod payments;
pub mod products;
pub mod validate;

pub use error::ApiError;

use crate::auth::{TokenDenylist, TokenService};
use crate::clients::{CartClient, OrderClient, PaymentClient, ProductClient, UserClient};
use crate::dashboard::SellerDashboard;
use crate::images::ImageStore;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Everything a handler can reach. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub products: ProductClient,
    pub carts: CartClient,
    pub orders: OrderClient,
    pub payments: PaymentClient,
    pub dashboard: SellerDashboard,
    pub tokens: TokenService,
    pub denylist: Arc<TokenDenylist>,
    pub images: Arc<dyn ImageStore>,
    pub bcrypt_cost: u32,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth::router())
        .nest("/api/products", products::router())
        .nest("/api/cart", cart::router())
        .nest("/api/orders", orders::router())
        .nest("/api/payments", payments::router())
        .nest("/api/seller/dashboard", dashboard::router())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Serves until `shutdown` resolves, then lets in-flight requests finish.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
