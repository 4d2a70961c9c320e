//! [`ActorEntity`] implementation for [`Cart`].
//!
//! Carts use the owner's [`UserId`] as their ID via `natural_id`, so a second
//! create for the same user is answered with `Conflict` instead of a duplicate.

use super::actions::CartAction;
use super::error::CartError;
use crate::model::{Cart, CartCreate, UserId};
use async_trait::async_trait;
use nexora_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = Cart;
    type Context = ();
    type Error = CartError;

    fn from_create_params(id: UserId, _params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(id))
    }

    fn natural_id(params: &CartCreate) -> Option<UserId> {
        Some(params.user)
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, action: CartAction, _ctx: &()) -> Result<Cart, Self::Error> {
        match action {
            CartAction::AddItem {
                product_id,
                quantity,
            } => self.add(product_id, quantity),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => {
                if !self.set_quantity(product_id, quantity) {
                    return Err(CartError::ItemNotFound);
                }
            }
            CartAction::RemoveItem(product_id) => {
                if !self.remove(product_id) {
                    return Err(CartError::ItemNotFound);
                }
            }
            CartAction::Clear => self.clear(),
        }
        Ok(self.clone())
    }
}
