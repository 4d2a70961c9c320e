//! Mapping from domain errors to HTTP responses.
//!
//! Every failure is answered as `{ "message": ... }`. Internal failures keep
//! their detail in the log and answer `Internal Server Error`.

use crate::auth::AuthError;
use crate::cart_actor::CartError;
use crate::dashboard::DashboardError;
use crate::images::ImageError;
use crate::order_actor::OrderError;
use crate::payment_actor::PaymentError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    BadGateway(String),
    #[error("Internal Server Error")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(detail) => error!(%detail, "Request failed"),
            ApiError::BadGateway(detail) => warn!(%detail, "Upstream failed"),
            _ => {}
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken | AuthError::InvalidToken => {
                ApiError::Unauthorized(e.to_string())
            }
            AuthError::InsufficientPermission => ApiError::Forbidden(e.to_string()),
            AuthError::Issue(_) | AuthError::Hashing(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound | UserError::AddressNotFound => ApiError::NotFound(e.to_string()),
            UserError::AlreadyExists => ApiError::Conflict(e.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
            UserError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound => ApiError::NotFound(e.to_string()),
            ProductError::ForbiddenUpdate | ProductError::ForbiddenDelete => {
                ApiError::Forbidden(e.to_string())
            }
            ProductError::OutOfStock { .. } => ApiError::Conflict(e.to_string()),
            ProductError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::NotFound | CartError::ItemNotFound => ApiError::NotFound(e.to_string()),
            CartError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound => ApiError::NotFound(e.to_string()),
            OrderError::Forbidden => ApiError::Forbidden(e.to_string()),
            OrderError::EmptyCart | OrderError::MixedCurrency => ApiError::BadRequest(e.to_string()),
            OrderError::CannotCancel
            | OrderError::CannotUpdateAddress
            | OrderError::InvalidTransition { .. } => ApiError::Conflict(e.to_string()),
            OrderError::Product(inner) => inner.into(),
            OrderError::Cart(inner) => inner.into(),
            OrderError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(e: PaymentError) -> Self {
        match e {
            PaymentError::NotFound | PaymentError::InvalidSignature => {
                ApiError::BadRequest(e.to_string())
            }
            PaymentError::OrderNotFound => ApiError::NotFound(e.to_string()),
            PaymentError::Forbidden => ApiError::Forbidden(e.to_string()),
            PaymentError::OrderNotPayable => ApiError::Conflict(e.to_string()),
            PaymentError::Gateway(_) => ApiError::BadGateway(e.to_string()),
            PaymentError::Order(inner) => inner.into(),
            PaymentError::User(inner) => inner.into(),
            PaymentError::ActorCommunicationError(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::Product(inner) => inner.into(),
            DashboardError::Order(inner) => inner.into(),
        }
    }
}

impl From<ImageError> for ApiError {
    fn from(e: ImageError) -> Self {
        ApiError::BadGateway(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_order_errors_keep_their_status() {
        let out_of_stock = OrderError::Product(ProductError::OutOfStock {
            title: "Lamp".into(),
            requested: 2,
            available: 1,
        });
        assert_eq!(ApiError::from(out_of_stock).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(OrderError::Product(ProductError::NotFound)).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = ApiError::from(CartError::ActorCommunicationError("Actor closed".into()));
        assert_eq!(err.to_string(), "Internal Server Error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn payment_lookup_failures_are_bad_requests() {
        assert_eq!(ApiError::from(PaymentError::NotFound).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(PaymentError::InvalidSignature).to_string(),
            "Invalid signature"
        );
    }
}
