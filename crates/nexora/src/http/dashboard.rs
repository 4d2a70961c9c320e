//! `/api/seller/dashboard`: read-only views for sellers.

use super::error::ApiError;
use super::extract::AuthUser;
use super::AppState;
use crate::model::Role;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/orders", get(orders))
        .route("/products", get(products))
}

async fn metrics(State(state): State<AppState>, caller: AuthUser) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::Seller])?;
    let metrics = state.dashboard.metrics(caller.id()).await?;
    Ok(Json(json!(metrics)))
}

async fn orders(State(state): State<AppState>, caller: AuthUser) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::Seller])?;
    let orders = state.dashboard.orders(caller.id()).await?;
    Ok(Json(json!({ "orders": orders })))
}

async fn products(State(state): State<AppState>, caller: AuthUser) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::Seller])?;
    let products = state.dashboard.products(caller.id()).await?;
    Ok(Json(json!({ "products": products })))
}
