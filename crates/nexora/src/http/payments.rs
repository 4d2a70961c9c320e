//! `/api/payments`: opening gateway orders and verifying checkouts.

use super::error::ApiError;
use super::extract::{ApiJson, AuthUser};
use super::validate::required;
use super::AppState;
use crate::clients::VerifyPayment;
use crate::model::{OrderId, PaymentCreate, Role};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create/:order_id", post(create))
        .route("/verify", post(verify))
}

async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    caller.require(&[Role::User])?;
    let order: OrderId = raw
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid order id"))?;

    let payment = state
        .payments
        .initiate(PaymentCreate {
            order,
            user: caller.id(),
        })
        .await?;
    info!(payment = %payment.id, gateway_order = %payment.razorpay_order_id, "Payment initiated");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Payment initiated", "payment": payment })),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyBody {
    razorpay_order_id: Option<String>,
    payment_id: Option<String>,
    signature: Option<String>,
}

async fn verify(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(body): ApiJson<VerifyBody>,
) -> Result<Json<Value>, ApiError> {
    caller.require(&[Role::User])?;
    let razorpay_order_id = required(&body.razorpay_order_id, "razorpayOrderId is required")?;
    let payment_id = required(&body.payment_id, "paymentId is required")?;
    let signature = required(&body.signature, "signature is required")?;

    let payment = state
        .payments
        .verify(VerifyPayment {
            requested_by: caller.id(),
            razorpay_order_id: razorpay_order_id.to_string(),
            payment_id: payment_id.to_string(),
            signature: signature.to_string(),
        })
        .await?;
    Ok(Json(json!({ "message": "Payment verified sucessfully", "payment": payment })))
}
