//! # Payment Client

use super::classify;
use crate::model::{Payment, PaymentCreate, PaymentStatus, UserId};
use crate::payment_actor::{PaymentAction, PaymentError};
use async_trait::async_trait;
use nexora_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Checkout callback fields, as the gateway hands them to the browser.
#[derive(Clone)]
pub struct VerifyPayment {
    pub requested_by: UserId,
    pub razorpay_order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl std::fmt::Debug for VerifyPayment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyPayment")
            .field("requested_by", &self.requested_by)
            .field("razorpay_order_id", &self.razorpay_order_id)
            .field("payment_id", &self.payment_id)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct PaymentClient {
    inner: ResourceClient<Payment>,
}

impl PaymentClient {
    pub fn new(inner: ResourceClient<Payment>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Payment> for PaymentClient {
    type Error = PaymentError;

    fn inner(&self) -> &ResourceClient<Payment> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        classify(e, PaymentError::NotFound, PaymentError::ActorCommunicationError)
    }
}

impl PaymentClient {
    /// Opens a gateway order for one of the caller's pending orders.
    #[instrument(skip(self))]
    pub async fn initiate(&self, params: PaymentCreate) -> Result<Payment, PaymentError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.get(id).await?.ok_or(PaymentError::NotFound)
    }

    /// Finds the pending payment for the gateway order and verifies it.
    #[instrument(skip(self))]
    pub async fn verify(&self, request: VerifyPayment) -> Result<Payment, PaymentError> {
        let gateway_order = request.razorpay_order_id.clone();
        let pending = self
            .inner
            .query(move |p: &Payment| {
                p.status == PaymentStatus::Pending && p.razorpay_order_id == gateway_order
            })
            .await
            .map_err(Self::map_error)?;
        let payment = pending.first().ok_or(PaymentError::NotFound)?;

        debug!(payment = %payment.id, "Sending request");
        self.inner
            .perform_action(
                payment.id,
                PaymentAction::Verify {
                    requested_by: request.requested_by,
                    payment_id: request.payment_id,
                    signature: request.signature,
                },
            )
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, PaymentId};
    use nexora_actor::mock::MockClient;

    fn request() -> VerifyPayment {
        VerifyPayment {
            requested_by: UserId(1),
            razorpay_order_id: "order_sandbox_1".into(),
            payment_id: "pay_1".into(),
            signature: "00".into(),
        }
    }

    fn pending() -> Payment {
        let mut p = Payment::new(
            PaymentId(4),
            PaymentCreate {
                order: OrderId(2),
                user: UserId(1),
            },
        );
        p.razorpay_order_id = "order_sandbox_1".into();
        p
    }

    #[tokio::test]
    async fn unknown_gateway_order_is_payment_not_found() {
        let mut mock = MockClient::<Payment>::new();
        mock.expect_query().return_ok(vec![]);
        let client = PaymentClient::new(mock.client());

        let err = client.verify(request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Payment not found");
        mock.verify();
    }

    #[tokio::test]
    async fn verification_goes_to_the_matching_payment() {
        let mut mock = MockClient::<Payment>::new();
        mock.expect_query().return_ok(vec![pending()]);
        mock.expect_action(PaymentId(4))
            .return_err(FrameworkError::EntityError(Box::new(PaymentError::InvalidSignature)));
        let client = PaymentClient::new(mock.client());

        assert_eq!(
            client.verify(request()).await.unwrap_err(),
            PaymentError::InvalidSignature
        );
        mock.verify();
    }
}
