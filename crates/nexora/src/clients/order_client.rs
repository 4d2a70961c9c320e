//! # Order Client
//!
//! Owner-facing reads are checked here (`order_for`, `my_orders`); state
//! changes are checked inside the actor.

use super::classify;
use crate::model::{
    Order, OrderCreate, OrderId, OrderPage, OrderStatus, ProductId, ShippingAddress, UserId,
};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use nexora_actor::{ActorClient, FrameworkError, ResourceClient};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        classify(e, OrderError::NotFound, OrderError::ActorCommunicationError)
    }
}

impl OrderClient {
    /// Prices the user's cart into a new `PENDING` order.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.get(id).await?.ok_or(OrderError::NotFound)
    }

    /// Fetches an order on behalf of `requester`, who must own it.
    #[instrument(skip(self))]
    pub async fn order_for(&self, id: OrderId, requester: UserId) -> Result<Order, OrderError> {
        let order = self.get(id).await?.ok_or(OrderError::NotFound)?;
        if order.user != requester {
            return Err(OrderError::Forbidden);
        }
        Ok(order)
    }

    /// The user's orders, newest first. `page` is 1-based.
    #[instrument(skip(self))]
    pub async fn my_orders(
        &self,
        user: UserId,
        page: usize,
        limit: usize,
    ) -> Result<OrderPage, OrderError> {
        debug!("Sending request");
        let mut orders = self
            .inner
            .query(move |o: &Order| o.user == user)
            .await
            .map_err(Self::map_error)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = orders.len();
        let skip = page.saturating_sub(1).saturating_mul(limit);
        Ok(OrderPage {
            orders: orders.into_iter().skip(skip).take(limit).collect(),
            page,
            limit,
            total,
        })
    }

    /// Every order with at least one line for one of `products`.
    #[instrument(skip(self, products))]
    pub async fn containing_any(
        &self,
        products: BTreeSet<ProductId>,
    ) -> Result<Vec<Order>, OrderError> {
        debug!(products = products.len(), "Sending request");
        self.inner
            .query(move |o: &Order| o.items.iter().any(|i| products.contains(&i.product)))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        id: OrderId,
        requested_by: UserId,
        reason: Option<String>,
    ) -> Result<Order, OrderError> {
        self.act(
            id,
            OrderAction::Cancel {
                requested_by,
                reason,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_address(
        &self,
        id: OrderId,
        requested_by: UserId,
        address: ShippingAddress,
    ) -> Result<Order, OrderError> {
        self.act(
            id,
            OrderAction::UpdateAddress {
                requested_by,
                address,
            },
        )
        .await
    }

    /// Marks a paid order `CONFIRMED`.
    #[instrument(skip(self))]
    pub async fn confirm(&self, id: OrderId) -> Result<Order, OrderError> {
        self.advance(id, OrderStatus::Confirmed).await
    }

    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId, next: OrderStatus) -> Result<Order, OrderError> {
        self.act(id, OrderAction::Advance(next)).await
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}
