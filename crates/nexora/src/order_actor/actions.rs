//! Custom actions for the Order actor. Every action answers with the order as
//! it stands afterwards.

use crate::model::{OrderStatus, ShippingAddress, UserId};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Owner cancellation; only allowed while the order is `PENDING`.
    Cancel {
        requested_by: UserId,
        reason: Option<String>,
    },
    /// Owner address change; only allowed while the order is `PENDING`.
    UpdateAddress {
        requested_by: UserId,
        address: ShippingAddress,
    },
    /// System-driven move along the lifecycle, e.g. `CONFIRMED` after payment.
    Advance(OrderStatus),
}
