//! [`ActorEntity`] implementation for [`Order`].

use super::actions::OrderAction;
use super::error::OrderError;
use crate::clients::{CartClient, ProductClient};
use crate::model::{Order, OrderCreate, OrderId, OrderItem, OrderStatus, Price};
use async_trait::async_trait;
use chrono::Utc;
use nexora_actor::{ActorClient, ActorEntity};
use tracing::debug;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = (CartClient, ProductClient);
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Order::new(id, params))
    }

    /// Prices the order from the owner's cart.
    ///
    /// # Errors
    /// - `EmptyCart` if the user has no cart or it has no lines
    /// - `Product(NotFound)` / `Product(OutOfStock)` from the stock check
    /// - `MixedCurrency` if lines disagree on currency
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let (carts, products) = ctx;
        let cart = carts
            .get(self.user)
            .await?
            .filter(|cart| !cart.items.is_empty())
            .ok_or(OrderError::EmptyCart)?;

        let mut items = Vec::with_capacity(cart.items.len());
        let mut currency = None;
        let mut total = 0.0;
        for line in &cart.items {
            let product = products.check_stock(line.product_id, line.quantity).await?;
            match currency {
                None => currency = Some(product.price.currency),
                Some(c) if c != product.price.currency => return Err(OrderError::MixedCurrency),
                Some(_) => {}
            }
            let amount = product.price.amount * f64::from(line.quantity);
            total += amount;
            items.push(OrderItem {
                product: product.id,
                quantity: line.quantity,
                price: Price::new(amount, product.price.currency),
            });
        }

        debug!(lines = items.len(), total, "Order priced");
        self.items = items;
        self.total_price = Price::new(total, currency.unwrap_or_default());
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Self::Context,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::Cancel {
                requested_by,
                reason,
            } => {
                if requested_by != self.user {
                    return Err(OrderError::Forbidden);
                }
                if self.status != OrderStatus::Pending {
                    return Err(OrderError::CannotCancel);
                }
                self.status = OrderStatus::Cancelled;
                self.cancellation_reason = reason;
            }
            OrderAction::UpdateAddress {
                requested_by,
                address,
            } => {
                if requested_by != self.user {
                    return Err(OrderError::Forbidden);
                }
                if self.status != OrderStatus::Pending {
                    return Err(OrderError::CannotUpdateAddress);
                }
                self.shipping_address = address;
            }
            OrderAction::Advance(next) => {
                if !self.status.can_transition_to(next) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: next,
                    });
                }
                self.status = next;
            }
        }
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}
