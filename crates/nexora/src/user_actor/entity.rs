//! [`ActorEntity`] implementation for [`User`].
//!
//! Uniqueness of username and email is enforced with `conflicts_with`, so two
//! concurrent registrations for the same email cannot both succeed. A successful
//! registration publishes `AUTH_NOTIFICATION.USER_CREATED`.

use super::actions::{UserAction, UserActionResult};
use super::error::UserError;
use crate::model::{User, UserCreate, UserId};
use crate::notification::{Broker, BrokerEvent, UserCreated};
use async_trait::async_trait;
use nexora_actor::ActorEntity;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = ();
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Context = Broker;
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        Ok(User::new(id, params))
    }

    fn conflicts_with(&self, existing: &Self) -> bool {
        self.username == existing.username || self.email == existing.email
    }

    async fn on_create(&mut self, broker: &Broker) -> Result<(), Self::Error> {
        broker.publish(BrokerEvent::UserCreated(UserCreated {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
        }));
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _broker: &Broker) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        _broker: &Broker,
    ) -> Result<UserActionResult, Self::Error> {
        match action {
            UserAction::AddAddress(address) => {
                Ok(UserActionResult::AddressAdded(self.add_address(address)))
            }
            UserAction::RemoveAddress(id) => {
                self.remove_address(id).ok_or(UserError::AddressNotFound)?;
                Ok(UserActionResult::AddressRemoved(self.addresses.clone()))
            }
        }
    }
}
