//! `/api/cart`: the caller's own cart.

use super::error::ApiError;
use super::extract::{ApiJson, AuthUser};
use super::validate::positive_quantity;
use super::AppState;
use crate::model::{Cart, ProductId, Role};
use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).delete(clear))
        .route("/items", post(add_item))
        .route("/items/:product_id", patch(update_item).delete(remove_item))
}

fn product_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("invalid Product Id format"))
}

fn cart_body(message: Option<&str>, cart: &Cart) -> Json<Value> {
    let mut body = json!({ "cart": cart, "totals": cart.totals() });
    if let Some(message) = message {
        body["message"] = json!(message);
    }
    Json(body)
}

async fn get_cart(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::User])?;
    let cart = state.carts.get_or_create(caller.id()).await?;
    Ok(cart_body(None, &cart))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemBody {
    product_id: Option<Value>,
    qty: Option<Value>,
}

async fn add_item(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(body): ApiJson<AddItemBody>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::User])?;
    let product = body
        .product_id
        .as_ref()
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::bad_request("Product id must be a string"))
        .and_then(product_id)?;
    let qty = positive_quantity(body.qty.as_ref())?;

    let cart = state.carts.add_item(caller.id(), product, qty).await?;
    Ok(cart_body(Some("Item added to cart"), &cart))
}

#[derive(Deserialize)]
struct QuantityBody {
    qty: Option<Value>,
}

async fn update_item(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(raw): Path<String>,
    ApiJson(body): ApiJson<QuantityBody>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::User])?;
    let product = product_id(&raw)?;
    let qty = positive_quantity(body.qty.as_ref())?;

    let cart = state.carts.set_quantity(caller.id(), product, qty).await?;
    Ok(cart_body(Some("Cart item updated"), &cart))
}

async fn remove_item(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(raw): Path<String>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::User])?;
    let cart = state.carts.remove_item(caller.id(), product_id(&raw)?).await?;
    Ok(cart_body(Some("Item removed from cart"), &cart))
}

async fn clear(State(state): State<AppState>, caller: AuthUser) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::User])?;
    let cart = state.carts.clear(caller.id()).await?;
    Ok(cart_body(Some("Cart cleared"), &cart))
}
