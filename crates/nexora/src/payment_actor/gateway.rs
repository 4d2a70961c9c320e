//! Payment gateways.
//!
//! The payment actor only needs one thing from a gateway: open an order for an
//! amount in minor units and hand back its ID. [`RazorpayGateway`] does that over
//! Razorpay's REST API; [`SandboxGateway`] answers locally with sequential IDs
//! and is used when no credentials are configured.

use crate::model::Currency;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error};

const RAZORPAY_ORDERS_URL: &str = "https://api.razorpay.com/v1/orders";

/// An order opened on the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayOrder {
    pub id: String,
    /// Minor units.
    pub amount: u64,
    pub currency: Currency,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("gateway rejected the order ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("unexpected gateway response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(
        &self,
        amount: u64,
        currency: Currency,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError>;
}

#[derive(Serialize)]
struct CreateOrderRequest<'a> {
    amount: u64,
    currency: Currency,
    receipt: &'a str,
}

#[derive(Deserialize)]
struct CreateOrderResponse {
    id: String,
    amount: u64,
    currency: String,
}

pub struct RazorpayGateway {
    client: Client,
    key_id: String,
    key_secret: String,
    url: String,
}

impl RazorpayGateway {
    pub fn new(key_id: String, key_secret: String) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            key_id,
            key_secret,
            url: RAZORPAY_ORDERS_URL.to_string(),
        })
    }

    /// Points the gateway at another orders endpoint.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        amount: u64,
        currency: Currency,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        debug!(amount, %currency, receipt, "Opening gateway order");
        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&CreateOrderRequest {
                amount,
                currency,
                receipt,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "Gateway rejected order");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let order: CreateOrderResponse = response.json().await?;
        let currency = order
            .currency
            .parse()
            .map_err(|_| GatewayError::Parse(format!("currency {:?}", order.currency)))?;
        Ok(GatewayOrder {
            id: order.id,
            amount: order.amount,
            currency,
        })
    }
}

/// Offline gateway with IDs `order_sandbox_1`, `order_sandbox_2`, ...
#[derive(Debug, Default)]
pub struct SandboxGateway {
    next: AtomicU64,
}

impl SandboxGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentGateway for SandboxGateway {
    async fn create_order(
        &self,
        amount: u64,
        currency: Currency,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(amount, %currency, receipt, n, "Sandbox gateway order");
        Ok(GatewayOrder {
            id: format!("order_sandbox_{n}"),
            amount,
            currency,
        })
    }
}
