//! # ActorClient Trait
//!
//! Shared surface for the typed clients in the application crate (`ProductClient`,
//! `OrderClient`, ...). Each one wraps a [`ResourceClient`] and only has to say how
//! a [`FrameworkError`] becomes its own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read and delete calls.
///
/// # Example
///
/// ```rust
/// use nexora_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Coupon { id: u32 }
/// #[derive(Debug)] struct CouponCreate;
/// #[derive(Debug)] struct CouponUpdate;
/// #[derive(Debug)] enum CouponAction {}
///
/// #[derive(Debug, thiserror::Error)]
/// enum CouponError {
///     #[error("Coupon not found")] NotFound,
///     #[error("Actor communication error: {0}")] ActorCommunicationError(String),
/// }
///
/// #[async_trait]
/// impl ActorEntity for Coupon {
///     type Id = u32;
///     type Create = CouponCreate;
///     type Update = CouponUpdate;
///     type Action = CouponAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = CouponError;
///
///     fn from_create_params(id: u32, _: CouponCreate) -> Result<Self, CouponError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: CouponUpdate, _: &()) -> Result<(), CouponError> { Ok(()) }
///     async fn handle_action(&mut self, _: CouponAction, _: &()) -> Result<(), CouponError> { Ok(()) }
/// }
///
/// struct CouponClient { inner: ResourceClient<Coupon> }
///
/// #[async_trait]
/// impl ActorClient<Coupon> for CouponClient {
///     type Error = CouponError;
///
///     fn inner(&self) -> &ResourceClient<Coupon> { &self.inner }
///
///     fn map_error(e: FrameworkError) -> CouponError {
///         match e {
///             FrameworkError::NotFound(_) => CouponError::NotFound,
///             other => CouponError::ActorCommunicationError(other.to_string()),
///         }
///     }
/// }
///
/// async fn usage(client: CouponClient) {
///     let _ = client.get(1).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
