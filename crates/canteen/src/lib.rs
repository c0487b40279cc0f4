//! # Canteen
//!
//! The ordering core of a food-court app: diners sign in, fill a cart from the menu, pay from a
//! daily allowance and get told when their food is ready.
//!
//! ## Core Components
//!
//! - **[model]**: plain data ([`Account`](model::Account), [`Order`](model::Order),
//!   [`Cart`](model::Cart), notifications) with the rules that need no actor.
//! - **[account_actor]**: every diner account lives in one
//!   [`ResourceActor`](canteen_actor::ResourceActor); balance changes are serialized there.
//! - **[ready_timer]**: per-order countdowns and the notification board.
//! - **[clients]**: typed wrappers that hide the message passing.
//! - **[store]**: the persisted record layout over a key-value store.
//! - **[lifecycle]**: [`CanteenSystem`](lifecycle::CanteenSystem), which starts the actors and
//!   orchestrates sessions and checkout.
//!
//! ## Testing
//!
//! Unit tests sit next to the code. `tests/` drives a full [`CanteenSystem`](lifecycle::CanteenSystem)
//! with paused Tokio time, and runs the real account actor against an instrumented store.

pub mod account_actor;
pub mod auth;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod notifications;
pub mod ready_timer;
pub mod store;
