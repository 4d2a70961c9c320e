//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes catalogue operations.

use super::classify;
use crate::model::{Product, ProductCreate, ProductId, ProductQuery, ProductUpdate, UserId};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use nexora_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        classify(e, ProductError::NotFound, ProductError::ActorCommunicationError)
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.product(id).await
    }

    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id).await?.ok_or(ProductError::NotFound)
    }

    /// Ownership is checked inside the actor, so a concurrent delete cannot race it.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(
        &self,
        id: ProductId,
        requested_by: UserId,
    ) -> Result<(), ProductError> {
        let product = self.product(id).await?;
        if product.seller != requested_by {
            return Err(ProductError::ForbiddenDelete);
        }
        self.delete(id).await
    }

    /// Filters the catalogue, then applies `skip`/`limit`. A zero limit returns
    /// everything after `skip`.
    #[instrument(skip(self))]
    pub async fn search(&self, query: ProductQuery) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let (skip, limit) = (query.skip, query.limit);
        let found = self
            .inner
            .query(move |p: &Product| query.accepts(p))
            .await
            .map_err(Self::map_error)?;
        let limit = if limit == 0 { usize::MAX } else { limit };
        Ok(found.into_iter().skip(skip).take(limit).collect())
    }

    /// Checks that `quantity` units are available and returns the product the
    /// check passed against. Stock is left untouched.
    #[instrument(skip(self))]
    pub async fn check_stock(
        &self,
        id: ProductId,
        quantity: u32,
    ) -> Result<Product, ProductError> {
        debug!("Checking stock for product {}", id);
        let ProductActionResult::CheckStock(product) = self
            .inner
            .perform_action(id, ProductAction::CheckStock(quantity))
            .await
            .map_err(Self::map_error)?;
        Ok(product)
    }
}
