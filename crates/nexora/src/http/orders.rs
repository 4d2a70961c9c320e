//! `/api/orders`: placing and managing the caller's orders.

use super::error::ApiError;
use super::extract::{ApiJson, AuthUser};
use super::validate::AddressFields;
use super::AppState;
use crate::model::{OrderCreate, OrderId, Role, ShippingAddress};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::info;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/me", get(my_orders))
        .route("/:id", get(get_one))
        .route("/:id/cancel", post(cancel))
        .route("/:id/address", patch(update_address))
}

fn order_id(raw: &str) -> Result<OrderId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid order id"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShippingBody {
    shipping_address: Option<AddressFields>,
}

impl ShippingBody {
    fn check(&self) -> Result<ShippingAddress, ApiError> {
        let a = match &self.shipping_address {
            Some(fields) => fields.check()?,
            None => AddressFields::default().check()?,
        };
        Ok(ShippingAddress {
            street: a.street,
            city: a.city,
            state: a.state,
            pincode: a.pincode,
            country: a.country,
        })
    }
}

async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(body): ApiJson<ShippingBody>,
) -> Result<impl IntoResponse, ApiError> {
    caller.require(&[Role::User])?;
    let shipping_address = body.check()?;
    let order = state
        .orders
        .create_order(OrderCreate {
            user: caller.id(),
            shipping_address,
        })
        .await?;
    info!(order = %order.id, total = order.total_price.amount, "Order placed");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Order placed", "order": order })),
    ))
}

async fn my_orders(
    State(state): State<AppState>,
    caller: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::User])?;
    let number = |key: &str| {
        params
            .get(key)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
    };
    let page = number("page").unwrap_or(1);
    let limit = number("limit").unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    let page = state.orders.my_orders(caller.id(), page, limit).await?;
    Ok(Json(json!(page)))
}

async fn get_one(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(raw): Path<String>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::User])?;
    let order = state.orders.order_for(order_id(&raw)?, caller.id()).await?;
    Ok(Json(json!({ "order": order })))
}

#[derive(Deserialize)]
struct CancelBody {
    reason: Option<String>,
}

async fn cancel(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(raw): Path<String>,
    body: Option<Json<CancelBody>>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::User])?;
    let id = order_id(&raw)?;
    let reason = body
        .and_then(|Json(b)| b.reason)
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let order = state.orders.cancel(id, caller.id(), reason).await?;
    Ok(Json(json!({ "message": "Order cancelled", "order": order })))
}

async fn update_address(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(raw): Path<String>,
    ApiJson(body): ApiJson<ShippingBody>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::User])?;
    let id = order_id(&raw)?;
    let address = body.check()?;

    let order = state.orders.update_address(id, caller.id(), address).await?;
    Ok(Json(json!({ "message": "Order address updated", "order": order })))
}
