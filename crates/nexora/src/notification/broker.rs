//! In-process event broker.
//!
//! A `tokio::sync::broadcast` channel carrying [`BrokerEvent`]s. Publishers never
//! wait on consumers and never fail: with nobody subscribed an event is dropped
//! and logged at debug level.

use crate::model::{FullName, OrderId, UserId};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

pub const USER_CREATED: &str = "AUTH_NOTIFICATION.USER_CREATED";
pub const PAYMENT_COMPLETED: &str = "PAYMENT_NOTIFICATION.PAYMENT_COMPLETED";
pub const PAYMENT_FAILED: &str = "PAYMENT_NOTIFICATION.PAYMENT_FAILED";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: FullName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCompleted {
    pub email: String,
    pub username: String,
    pub full_name: FullName,
    pub order_id: OrderId,
    pub payment_id: String,
    /// Major units.
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFailed {
    pub email: String,
    pub username: String,
    /// The gateway order the failed verification referred to.
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrokerEvent {
    UserCreated(UserCreated),
    PaymentCompleted(PaymentCompleted),
    PaymentFailed(PaymentFailed),
}

impl BrokerEvent {
    /// Queue name the event is published under.
    pub fn name(&self) -> &'static str {
        match self {
            BrokerEvent::UserCreated(_) => USER_CREATED,
            BrokerEvent::PaymentCompleted(_) => PAYMENT_COMPLETED,
            BrokerEvent::PaymentFailed(_) => PAYMENT_FAILED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Broker {
    sender: broadcast::Sender<BrokerEvent>,
}

impl Broker {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: BrokerEvent) {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => debug!(event = name, receivers, "Published"),
            Err(_) => debug!(event = name, "Published with no subscribers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BrokerEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed() -> BrokerEvent {
        BrokerEvent::PaymentFailed(PaymentFailed {
            email: "a@example.com".into(),
            username: "asha".into(),
            order_id: "order_rzp_1".into(),
        })
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_fine() {
        let broker = Broker::new(4);
        broker.publish(failed());
    }

    #[tokio::test]
    async fn subscribers_receive_events() {
        let broker = Broker::new(4);
        let mut rx = broker.subscribe();
        broker.publish(failed());

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name(), PAYMENT_FAILED);
        assert_eq!(event, failed());
    }
}
