//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a resource (an account, a menu, ...) implements to be
//! managed by the generic `ResourceActor`. It names the associated types for keys, DTOs, actions,
//! context and errors, and provides the lifecycle hooks (`on_create`, `on_update`, `on_delete`,
//! `handle_action`).
//!
//! # Keys
//! Unlike a database table, most of our resources already have a natural key: an account is
//! identified by the email it logs in with. [`ActorEntity::key_for`] lets the entity derive its key
//! from the creation payload, falling back to the actor's creation counter when it has none.
//! Creating a second entity under an existing key is rejected with
//! [`FrameworkError::AlreadyExists`](crate::FrameworkError::AlreadyExists).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await other actors or I/O. The `Context` type is
/// injected into every hook, which lets dependencies (stores, other clients) be bound when the
/// actor starts running rather than when it is constructed.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique key for this entity (e.g. an email, an order id).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g. `Deduct`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per actor rather than per action: clients match on a single type, at the
    /// cost of every action nominally being able to return every variant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Derives the key of a new entity from its creation payload.
    ///
    /// `seq` is a per-actor counter starting at 1, for entities without a natural key.
    fn key_for(params: &Self::Create, seq: u64) -> Self::Id;

    /// Construct the full entity from its key and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    /// Failing here aborts the create.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the actor.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
