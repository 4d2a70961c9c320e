use super::{Currency, OrderId, PaymentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// Amount in minor units (paise, cents), as the gateway recorded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorAmount {
    pub amount: u64,
    pub currency: Currency,
}

impl MinorAmount {
    pub fn major(&self) -> f64 {
        self.amount as f64 / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub order: OrderId,
    pub user: UserId,
    pub razorpay_order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub price: MinorAmount,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// A payment awaiting its gateway order; the actor fills that in `on_create`.
    pub fn new(id: PaymentId, params: PaymentCreate) -> Self {
        Self {
            id,
            order: params.order,
            user: params.user,
            razorpay_order_id: String::new(),
            payment_id: None,
            signature: None,
            price: MinorAmount {
                amount: 0,
                currency: Currency::default(),
            },
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PaymentCreate {
    pub order: OrderId,
    pub user: UserId,
}
