//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a queue
//! of scripted expectations instead of a running actor. Use it to test code that sits *around* a
//! client (orchestration, error mapping) without spawning the actor behind it.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, scripted replies | real entity store |
//! | **Determinism** | total | subject to the scheduler |
//! | **Error injection** | `return_err` | needs a state that fails |
//!
//! ## Testing Strategies
//!
//! 1. **Pure mock**: a domain client wrapping `mock.client()`; assert on what it returns.
//! 2. **Single actor**: spawn `ResourceActor::new(..).run(ctx)` and drive it through its client.
//! 3. **Actor with mocked dependencies**: a real actor whose context holds mocked clients.
//! 4. **Full system**: everything real; see the `canteen` crate's `tests/` directory.
//!
//! ## Simulating Failures
//!
//! ```rust
//! use canteen_actor::mock::MockClient;
//! use canteen_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Tab { id: u64 }
//! #[derive(Debug)] struct TabCreate;
//! #[derive(Debug)] struct TabUpdate;
//! #[derive(Debug)] enum TabAction {}
//! #[derive(Debug, thiserror::Error)] #[error("tab error")] struct TabError;
//!
//! #[async_trait]
//! impl ActorEntity for Tab {
//!     type Id = u64; type Create = TabCreate; type Update = TabUpdate;
//!     type Action = TabAction; type ActionResult = (); type Context = (); type Error = TabError;
//!     fn key_for(_: &TabCreate, seq: u64) -> u64 { seq }
//!     fn from_create_params(id: u64, _: TabCreate) -> Result<Self, TabError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: TabUpdate, _: &()) -> Result<(), TabError> { Ok(()) }
//!     async fn handle_action(&mut self, _: TabAction, _: &()) -> Result<(), TabError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tab>::new();
//!     let client = mock.client();
//!
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = client.get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Low-level Helpers
//!
//! [`create_mock_client`] returns a client plus the raw request receiver. Combined with
//! [`expect_action`] and friends, a test can inspect the exact payload a client sent before
//! replying to it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted reply, consumed in order by the mock's request loop.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Delete {
        response: Result<(), FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<(Option<<T as ActorEntity>::Id>, Expectation<T>)>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were registered. A request that does not
/// match the next expectation (wrong kind or wrong key) panics the mock task, which the client
/// then observes as [`FrameworkError::ActorDropped`].
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
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().expect("mock queue poisoned").pop_front();
                let Some((expected_id, expectation)) = next else {
                    panic!("Unexpected request: no expectations left");
                };

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Expectation::Get { response }) => {
                        check_id(&expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Expectation::Create { response },
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Expectation::Update { response },
                    ) => {
                        check_id(&expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Expectation::Delete { response },
                    ) => {
                        check_id(&expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Expectation::Action { response },
                    ) => {
                        check_id(&expected_id, &id);
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), |response| {
            Expectation::Get { response }
        })
    }

    /// Expects a `create`; the payload is not inspected.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), None, |response| {
            Expectation::Create { response }
        })
    }

    /// Expects an `update` of `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), |response| {
            Expectation::Update { response }
        })
    }

    /// Expects a `delete` of `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), |response| {
            Expectation::Delete { response }
        })
    }

    /// Expects an action on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), Some(id), |response| {
            Expectation::Action { response }
        })
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().expect("mock queue poisoned").len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

fn check_id<Id: PartialEq + std::fmt::Debug>(expected: &Option<Id>, actual: &Id) {
    if let Some(expected) = expected {
        assert_eq!(expected, actual, "request sent to an unexpected key");
    }
}

/// Finishes an expectation with the reply the mock will send.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    queue: Queue<T>,
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        queue: Queue<T>,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> Self {
        Self { queue, id, wrap }
    }

    /// Replies with a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Replies with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        self.queue
            .lock()
            .expect("mock queue poisoned")
            .push_back((self.id, expectation));
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: it pulls requests off the receiver, asserts on them and answers
/// through the enclosed `respond_to` sender.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a Delete.
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<(), FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
