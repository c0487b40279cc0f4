//! # Canteen Actor
//!
//! The resource-actor layer the canteen core is built on. Each kind of stateful resource (a
//! diner's account, a kitchen's timers) lives inside one Tokio task that owns it outright and
//! handles requests one at a time, so there is no shared mutable state and no locking.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the resource's data and business rules, written as plain
//!    synchronous-looking hooks.
//! 2. **Runtime** ([`ResourceActor`]): the message loop, key management and error wrapping.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed, cloneable handles.
//!
//! ## Requests
//!
//! Every resource speaks the same five requests ([`ResourceRequest`]): Create, Get, Update,
//! Delete and a resource-specific Action. Entity errors travel back boxed inside
//! [`FrameworkError::EntityError`]; [`FrameworkError::into_entity_error`] recovers the typed
//! error on the client side.
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`], not to the constructor. An account actor can
//! therefore be built before the store it persists to is opened, and tests can run a real actor
//! against an in-memory store.
//!
//! ```rust
//! use canteen_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! #[derive(Clone, Debug)] struct Wallet { owner: String, balance: u64 }
//! #[derive(Debug)] struct WalletCreate { owner: String }
//! #[derive(Debug)] struct WalletUpdate;
//! #[derive(Debug)] enum WalletAction { Spend(u64) }
//! #[derive(Debug, thiserror::Error)] #[error("insufficient balance")] struct WalletError;
//!
//! // Counts every successful spend; stands in for a real dependency.
//! type Audit = Arc<AtomicU64>;
//!
//! #[async_trait]
//! impl ActorEntity for Wallet {
//!     type Id = String;
//!     type Create = WalletCreate;
//!     type Update = WalletUpdate;
//!     type Action = WalletAction;
//!     type ActionResult = u64;
//!     type Context = Audit;
//!     type Error = WalletError;
//!
//!     fn key_for(params: &WalletCreate, _: u64) -> String { params.owner.clone() }
//!     fn from_create_params(owner: String, _: WalletCreate) -> Result<Self, WalletError> {
//!         Ok(Self { owner, balance: 2500 })
//!     }
//!     async fn on_update(&mut self, _: WalletUpdate, _: &Audit) -> Result<(), WalletError> { Ok(()) }
//!     async fn handle_action(&mut self, action: WalletAction, audit: &Audit) -> Result<u64, WalletError> {
//!         match action {
//!             WalletAction::Spend(amount) if amount <= self.balance => {
//!                 self.balance -= amount;
//!                 audit.fetch_add(1, Ordering::SeqCst);
//!                 Ok(self.balance)
//!             }
//!             WalletAction::Spend(_) => Err(WalletError),
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let audit = Arc::new(AtomicU64::new(0));
//!     let (actor, client) = ResourceActor::<Wallet>::new(10);
//!     tokio::spawn(actor.run(audit.clone()));
//!
//!     let id = client.create(WalletCreate { owner: "marydoe@gmail.com".into() }).await.unwrap();
//!     let left = client.perform_action(id.clone(), WalletAction::Spend(800)).await.unwrap();
//!     assert_eq!(left, 1700);
//!
//!     let refused = client.perform_action(id, WalletAction::Spend(5000)).await;
//!     let typed = refused.unwrap_err().into_entity_error::<WalletError>();
//!     assert!(typed.is_ok());
//!     assert_eq!(audit.load(Ordering::SeqCst), 1);
//! }
//! ```
//!
//! ## Shutdown
//!
//! An actor stops when the last clone of its client is dropped; `run` then returns after logging
//! the final store size.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient` from scripted expectations, for testing
//! client wrappers without an actor behind them.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
