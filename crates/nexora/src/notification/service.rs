use super::broker::{Broker, BrokerEvent};
use super::mailer::Mailer;
use super::templates;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, info, warn};

/// Turns broker events into emails until every publisher is gone.
pub struct NotificationService {
    receiver: broadcast::Receiver<BrokerEvent>,
    mailer: Arc<dyn Mailer>,
}

impl NotificationService {
    /// Subscribes immediately, so events published after this call are not missed.
    pub fn new(broker: &Broker, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            receiver: broker.subscribe(),
            mailer,
        }
    }

    pub async fn run(mut self) {
        info!("Notification service started");
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    debug!(event = event.name(), "Received");
                    let email = templates::render(&event);
                    if let Err(e) = self.mailer.send(email).await {
                        error!(event = event.name(), error = %e, "Failed to send email");
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "Notification service lagged; events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
        info!("Notification service stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{OutboxMailer, PaymentFailed};

    #[tokio::test]
    async fn events_become_emails_and_service_stops_with_broker() {
        let broker = Broker::new(8);
        let outbox = Arc::new(OutboxMailer::new());
        let service = NotificationService::new(&broker, outbox.clone());
        let handle = tokio::spawn(service.run());

        broker.publish(BrokerEvent::PaymentFailed(PaymentFailed {
            email: "asha@example.com".into(),
            username: "asha".into(),
            order_id: "order_sandbox_1".into(),
        }));
        drop(broker);
        handle.await.unwrap();

        let sent = outbox.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Payment Failed");
        assert!(sent[0].html.contains("order_sandbox_1"));
    }
}
