//! # Mock Clients
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of scripted expectations instead of a running actor. Use it to test
//! code that sits *around* a client (the order actor's stock checks, the seller
//! dashboard's aggregation) without spawning the actors it talks to.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | scripted replies | real store |
//! | Error injection | `return_err` | needs a crafted state |
//! | Use case | code that calls a client | the actor itself, full flows |
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation (wrong kind or wrong ID) panics the mock task, which the caller
//! observes as [`FrameworkError::ActorDropped`].
//!
//! ```rust
//! use nexora_actor::mock::MockClient;
//! use nexora_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Listing { id: u32, stock: u32 }
//! #[derive(Debug)] struct ListingCreate;
//! #[derive(Debug)] struct ListingUpdate;
//! #[derive(Debug)] enum ListingAction { CheckStock }
//! #[derive(Debug, thiserror::Error)] #[error("listing error")] struct ListingError;
//!
//! #[async_trait]
//! impl ActorEntity for Listing {
//!     type Id = u32; type Create = ListingCreate; type Update = ListingUpdate;
//!     type Action = ListingAction; type ActionResult = u32; type Context = (); type Error = ListingError;
//!     fn from_create_params(id: u32, _: ListingCreate) -> Result<Self, ListingError> { Ok(Self { id, stock: 0 }) }
//!     async fn on_update(&mut self, _: ListingUpdate, _: &()) -> Result<(), ListingError> { Ok(()) }
//!     async fn handle_action(&mut self, _: ListingAction, _: &()) -> Result<u32, ListingError> { Ok(self.stock) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Listing>::new();
//!     mock.expect_action(4).return_ok(12);
//!     mock.expect_get(5).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.perform_action(4, ListingAction::CheckStock).await.unwrap(), 12);
//!     assert!(matches!(client.get(5).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Query {
        response: Result<Vec<T>, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a
    /// Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&queue).pop_front();
                Self::answer(request, next);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    fn answer(request: ResourceRequest<T>, expectation: Option<Expectation<T>>) {
        match (request, expectation) {
            (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                assert_eq!(id, want, "get called with unexpected id");
                let _ = respond_to.send(response);
            }
            (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                let _ = respond_to.send(response);
            }
            (
                ResourceRequest::Update { id, respond_to, .. },
                Some(Expectation::Update { id: want, response }),
            ) => {
                assert_eq!(id, want, "update called with unexpected id");
                let _ = respond_to.send(response);
            }
            (
                ResourceRequest::Delete { id, respond_to },
                Some(Expectation::Delete { id: want, response }),
            ) => {
                assert_eq!(id, want, "delete called with unexpected id");
                let _ = respond_to.send(response);
            }
            (
                ResourceRequest::Action { id, respond_to, .. },
                Some(Expectation::Action { id: want, response }),
            ) => {
                assert_eq!(id, want, "action called with unexpected id");
                let _ = respond_to.send(response);
            }
            (ResourceRequest::Query { filter, respond_to }, Some(Expectation::Query { response })) => {
                let response = response.map(|items| items.into_iter().filter(|e| filter(e)).collect());
                let _ = respond_to.send(response);
            }
            (request, _) => panic!("Unexpected request or expectation mismatch: {request:?}"),
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Action { id, response })
    }

    /// The scripted list stands in for the store: the caller's filter runs over it
    /// like it would inside the actor.
    pub fn expect_query(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Query { response })
    }

    /// Panics if any expectation was never consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Pending expectation; finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: &Queue<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            build: Box::new(build),
        }
    }

    pub fn return_ok(self, value: R) {
        let expectation = (self.build)(Ok(value));
        lock(&self.expectations).push_back(expectation);
    }

    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.build)(Err(error));
        lock(&self.expectations).push_back(expectation);
    }
}

/// A bare client plus the receiving end of its channel, for tests that want to
/// inspect the exact request (e.g. which action was sent) before replying.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Seller {
        id: u32,
        shop: String,
    }

    #[derive(Debug)]
    struct SellerCreate {
        shop: String,
    }

    #[derive(Debug)]
    struct SellerUpdate;

    #[derive(Debug)]
    enum SellerAction {
        Suspend,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("seller error")]
    struct SellerError;

    #[async_trait]
    impl ActorEntity for Seller {
        type Id = u32;
        type Create = SellerCreate;
        type Update = SellerUpdate;
        type Action = SellerAction;
        type ActionResult = bool;
        type Context = ();
        type Error = SellerError;

        fn from_create_params(id: u32, params: SellerCreate) -> Result<Self, Self::Error> {
            Ok(Self { id, shop: params.shop })
        }

        async fn on_update(&mut self, _: SellerUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: SellerAction, _: &()) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    fn seller(id: u32) -> Seller {
        Seller {
            id,
            shop: format!("shop-{id}"),
        }
    }

    #[tokio::test]
    async fn raw_channel_exposes_request() {
        let (client, mut receiver) = create_mock_client::<Seller>(10);

        let task = tokio::spawn(async move {
            client
                .create(SellerCreate {
                    shop: "Loom & Co".into(),
                })
                .await
        });

        match receiver.recv().await {
            Some(ResourceRequest::Create { params, respond_to }) => {
                assert_eq!(params.shop, "Loom & Co");
                respond_to.send(Ok(7)).unwrap();
            }
            other => panic!("expected create, got {other:?}"),
        }
        assert_eq!(task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn expectations_answer_in_order() {
        let mut mock = MockClient::<Seller>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(seller(1)));
        mock.expect_update(1).return_ok(seller(1));
        mock.expect_action(1).return_ok(true);
        mock.expect_query().return_ok(vec![seller(1), seller(2)]);
        mock.expect_delete(1).return_err(FrameworkError::NotFound("1".into()));

        let client = mock.client();
        assert_eq!(client.create(SellerCreate { shop: "a".into() }).await.unwrap(), 1);
        assert_eq!(client.get(1).await.unwrap(), Some(seller(1)));
        assert_eq!(client.update(1, SellerUpdate).await.unwrap(), seller(1));
        assert!(client.perform_action(1, SellerAction::Suspend).await.unwrap());
        assert_eq!(client.query(|_| true).await.unwrap().len(), 2);
        assert!(matches!(
            client.delete(1).await,
            Err(FrameworkError::NotFound(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn query_runs_the_callers_filter_over_the_scripted_store() {
        let mut mock = MockClient::<Seller>::new();
        mock.expect_query().return_ok(vec![seller(1), seller(2), seller(3)]);
        mock.expect_query().return_err(FrameworkError::ActorClosed);

        let client = mock.client();
        let found = client.query(|s: &Seller| s.id != 2).await.unwrap();
        assert_eq!(found, vec![seller(1), seller(3)]);
        assert!(matches!(
            client.query(|_| true).await,
            Err(FrameworkError::ActorClosed)
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_request_drops_response() {
        let mut mock = MockClient::<Seller>::new();
        mock.expect_get(1).return_ok(None);

        let client = mock.client();
        let result = client.perform_action(1, SellerAction::Suspend).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn verify_reports_leftovers() {
        let mut mock = MockClient::<Seller>::new();
        mock.expect_get(3).return_ok(None);
        mock.verify();
    }
}
