//! # Cart Client
//!
//! Carts are created on first use. Edits on a user without a cart report
//! `Cart not found`; adding an item creates the cart first.

use super::classify;
use crate::cart_actor::{CartAction, CartError};
use crate::model::{Cart, CartCreate, ProductId, UserId};
use async_trait::async_trait;
use nexora_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        classify(e, CartError::NotFound, CartError::ActorCommunicationError)
    }
}

impl CartClient {
    /// Returns the user's cart, creating an empty one if needed.
    #[instrument(skip(self))]
    pub async fn get_or_create(&self, user: UserId) -> Result<Cart, CartError> {
        if let Some(cart) = self.get(user).await? {
            return Ok(cart);
        }
        debug!("Creating cart");
        match self.inner.create(CartCreate { user }).await {
            // Lost a race with another request for the same user.
            Ok(_) | Err(FrameworkError::Conflict(_)) => {}
            Err(e) => return Err(Self::map_error(e)),
        }
        self.get(user).await?.ok_or(CartError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        self.get_or_create(user).await?;
        self.edit(
            user,
            CartAction::AddItem {
                product_id,
                quantity,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        self.edit(
            user,
            CartAction::SetQuantity {
                product_id,
                quantity,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, user: UserId, product_id: ProductId) -> Result<Cart, CartError> {
        self.edit(user, CartAction::RemoveItem(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, user: UserId) -> Result<Cart, CartError> {
        self.edit(user, CartAction::Clear).await
    }

    async fn edit(&self, user: UserId, action: CartAction) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(user, action)
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexora_actor::mock::MockClient;

    #[tokio::test]
    async fn existing_cart_is_returned_without_create() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get(UserId(1)).return_ok(Some(Cart::new(UserId(1))));
        let client = CartClient::new(mock.client());

        let cart = client.get_or_create(UserId(1)).await.unwrap();
        assert_eq!(cart.user, UserId(1));
        mock.verify();
    }

    #[tokio::test]
    async fn create_race_falls_back_to_the_winner() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get(UserId(1)).return_ok(None);
        mock.expect_create()
            .return_err(FrameworkError::Conflict("user_1".into()));
        mock.expect_get(UserId(1)).return_ok(Some(Cart::new(UserId(1))));
        let client = CartClient::new(mock.client());

        assert!(client.get_or_create(UserId(1)).await.is_ok());
        mock.verify();
    }

    #[tokio::test]
    async fn editing_a_missing_cart_is_not_found() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action(UserId(2))
            .return_err(FrameworkError::NotFound("user_2".into()));
        let client = CartClient::new(mock.client());

        assert_eq!(
            client.set_quantity(UserId(2), ProductId(1), 3).await.unwrap_err(),
            CartError::NotFound
        );
    }

    #[tokio::test]
    async fn missing_line_is_item_not_found() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action(UserId(2))
            .return_err(FrameworkError::EntityError(Box::new(CartError::ItemNotFound)));
        let client = CartClient::new(mock.client());

        let err = client.remove_item(UserId(2), ProductId(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Product not found in cart");
    }
}
