//! # Account Actor
//!
//! Owns every loaded [`Account`]: the diner's cart, allowance and order history. All balance
//! changes go through this actor, so a deduction and a top-up can never interleave.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](canteen_actor::ActorEntity) implementation for [`Account`]
//! - [`error`] - [`AccountError`]
//! - [`actions`] - [`AccountAction`] and [`AccountActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Persistence
//!
//! The actor runs with an [`AccountContext`] holding the [`UserRecords`](crate::store::UserRecords)
//! it reads on create and writes after each mutating action.
//!
//! ## Usage
//!
//! ```rust
//! use canteen::account_actor::{self, AccountContext};
//! use canteen::clients::AccountClient;
//! use canteen::store::{MemoryStore, UserRecords};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = account_actor::new(32);
//!     let client = AccountClient::new(generic_client);
//!
//!     let records = UserRecords::new(Arc::new(MemoryStore::new()));
//!     tokio::spawn(actor.run(AccountContext { records, default_allowance: 2500 }));
//!
//!     let email = client.load_account("walker123@gmail.com").await?;
//!     let remaining = client.deduct(email.clone(), 800).await?;
//!     assert_eq!(remaining, 1700);
//!     assert_eq!(client.top_up(email, 500).await?, 2200);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::AccountContext;
pub use error::*;

use crate::model::Account;
use canteen_actor::{ResourceActor, ResourceClient};

/// Creates a new Account actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Account>, ResourceClient<Account>) {
    ResourceActor::new(buffer)
}
