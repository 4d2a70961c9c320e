//! [`ActorEntity`] implementation for [`Payment`].

use super::actions::PaymentAction;
use super::error::PaymentError;
use super::gateway::PaymentGateway;
use super::signature;
use crate::clients::{OrderClient, UserClient};
use crate::model::{MinorAmount, OrderStatus, Payment, PaymentCreate, PaymentId, PaymentStatus};
use crate::notification::{Broker, BrokerEvent, PaymentCompleted, PaymentFailed};
use async_trait::async_trait;
use nexora_actor::{ActorClient, ActorEntity};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the payment actor talks to.
#[derive(Clone)]
pub struct PaymentContext {
    pub orders: OrderClient,
    pub users: UserClient,
    pub gateway: Arc<dyn PaymentGateway>,
    pub broker: Broker,
    /// Gateway key secret, used to check checkout signatures.
    pub key_secret: String,
}

#[async_trait]
impl ActorEntity for Payment {
    type Id = PaymentId;
    type Create = PaymentCreate;
    type Update = ();
    type Action = PaymentAction;
    type ActionResult = Payment;
    type Context = PaymentContext;
    type Error = PaymentError;

    fn from_create_params(id: PaymentId, params: PaymentCreate) -> Result<Self, Self::Error> {
        Ok(Payment::new(id, params))
    }

    /// Opens a gateway order for the order total, in minor units.
    async fn on_create(&mut self, ctx: &PaymentContext) -> Result<(), Self::Error> {
        let order = ctx
            .orders
            .get(self.order)
            .await?
            .ok_or(PaymentError::OrderNotFound)?;
        if order.user != self.user {
            return Err(PaymentError::Forbidden);
        }
        if order.status != OrderStatus::Pending {
            return Err(PaymentError::OrderNotPayable);
        }

        let opened = ctx
            .gateway
            .create_order(
                order.total_price.to_minor_units(),
                order.total_price.currency,
                &order.id.to_string(),
            )
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        self.razorpay_order_id = opened.id;
        self.price = MinorAmount {
            amount: opened.amount,
            currency: opened.currency,
        };
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &PaymentContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PaymentAction,
        ctx: &PaymentContext,
    ) -> Result<Payment, Self::Error> {
        match action {
            PaymentAction::Verify {
                requested_by,
                payment_id,
                signature,
            } => {
                if requested_by != self.user {
                    return Err(PaymentError::Forbidden);
                }
                if self.status != PaymentStatus::Pending {
                    return Err(PaymentError::NotFound);
                }
                let user = ctx.users.user(self.user).await?;

                if !signature::verify(
                    &ctx.key_secret,
                    &self.razorpay_order_id,
                    &payment_id,
                    &signature,
                ) {
                    warn!(payment = %self.id, "Signature mismatch");
                    ctx.broker.publish(BrokerEvent::PaymentFailed(PaymentFailed {
                        email: user.email,
                        username: user.username,
                        order_id: self.razorpay_order_id.clone(),
                    }));
                    return Err(PaymentError::InvalidSignature);
                }

                // A paid order that can no longer be confirmed (cancelled in the
                // meantime) leaves the payment FAILED.
                if let Err(e) = ctx.orders.confirm(self.order).await {
                    self.status = PaymentStatus::Failed;
                    ctx.broker.publish(BrokerEvent::PaymentFailed(PaymentFailed {
                        email: user.email,
                        username: user.username,
                        order_id: self.razorpay_order_id.clone(),
                    }));
                    return Err(e.into());
                }

                self.status = PaymentStatus::Completed;
                self.payment_id = Some(payment_id.clone());
                self.signature = Some(signature);
                info!(payment = %self.id, order = %self.order, "Payment completed");

                ctx.broker.publish(BrokerEvent::PaymentCompleted(PaymentCompleted {
                    email: user.email,
                    username: user.username,
                    full_name: user.full_name,
                    order_id: self.order,
                    payment_id,
                    amount: self.price.major(),
                    currency: self.price.currency.to_string(),
                }));
                Ok(self.clone())
            }
        }
    }
}
