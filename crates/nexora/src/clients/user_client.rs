//! # User Client
//!
//! Registration, login lookups and the address book. Password hashing happens
//! in [`crate::auth`] before anything reaches the actor.

use super::classify;
use crate::model::{Address, AddressId, NewAddress, User, UserCreate, UserId};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use async_trait::async_trait;
use nexora_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Conflict(_) => UserError::AlreadyExists,
            other => classify(other, UserError::NotFound, UserError::ActorCommunicationError),
        }
    }
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn register(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.user(id).await
    }

    /// Fetches a user that is expected to exist.
    #[instrument(skip(self))]
    pub async fn user(&self, id: UserId) -> Result<User, UserError> {
        self.get(id).await?.ok_or(UserError::NotFound)
    }

    /// Finds the account a login names. When both fields are given, either may match.
    #[instrument(skip(self))]
    pub async fn find_by_login(
        &self,
        username: Option<String>,
        email: Option<String>,
    ) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let found = self
            .inner
            .query(move |u: &User| {
                username.as_deref() == Some(u.username.as_str())
                    || email.as_deref() == Some(u.email.as_str())
            })
            .await
            .map_err(Self::map_error)?;
        Ok(found.into_iter().next())
    }

    #[instrument(skip(self))]
    pub async fn add_address(&self, id: UserId, address: NewAddress) -> Result<Address, UserError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, UserAction::AddAddress(address))
            .await
            .map_err(Self::map_error)?
        {
            UserActionResult::AddressAdded(address) => Ok(address),
            other => unreachable!("AddAddress answered with {other:?}"),
        }
    }

    /// Returns the remaining address book.
    #[instrument(skip(self))]
    pub async fn remove_address(
        &self,
        id: UserId,
        address: AddressId,
    ) -> Result<Vec<Address>, UserError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, UserAction::RemoveAddress(address))
            .await
            .map_err(Self::map_error)?
        {
            UserActionResult::AddressRemoved(addresses) => Ok(addresses),
            other => unreachable!("RemoveAddress answered with {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FullName, Role};
    use nexora_actor::mock::MockClient;

    fn create() -> UserCreate {
        UserCreate {
            username: "asha".into(),
            email: "asha@example.com".into(),
            password_hash: "$2b$10$hash".into(),
            full_name: FullName {
                first_name: "Asha".into(),
                last_name: "Rao".into(),
            },
            role: Role::User,
            addresses: vec![],
        }
    }

    #[tokio::test]
    async fn duplicate_registration_maps_to_already_exists() {
        let mut mock = MockClient::<User>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("user_1".into()));
        let client = UserClient::new(mock.client());

        let err = client.register(create()).await.unwrap_err();
        assert_eq!(err, UserError::AlreadyExists);
        assert_eq!(err.to_string(), "User already exists!");
        mock.verify();
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let mut mock = MockClient::<User>::new();
        mock.expect_get(UserId(9)).return_ok(None);
        let client = UserClient::new(mock.client());

        assert_eq!(client.user(UserId(9)).await.unwrap_err(), UserError::NotFound);
    }

    #[tokio::test]
    async fn address_errors_survive_the_round_trip() {
        let mut mock = MockClient::<User>::new();
        mock.expect_action(UserId(1))
            .return_err(FrameworkError::EntityError(Box::new(UserError::AddressNotFound)));
        let client = UserClient::new(mock.client());

        let err = client
            .remove_address(UserId(1), AddressId(3))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::AddressNotFound);
    }

    #[tokio::test]
    async fn login_lookup_returns_first_match() {
        let mut mock = MockClient::<User>::new();
        let mut other = create();
        other.username = "bea".into();
        other.email = "bea@example.com".into();
        mock.expect_query()
            .return_ok(vec![User::new(UserId(2), other), User::new(UserId(1), create())]);
        let client = UserClient::new(mock.client());

        let found = client
            .find_by_login(None, Some("asha@example.com".into()))
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.id), Some(UserId(1)));
    }
}
