//! # System Lifecycle & Orchestration
//!
//! [`CanteenSystem`] wires the two actors together and is the surface a front end talks to.
//!
//! ## Wiring
//!
//! ```text
//!                 ┌──────────────────────┐
//!   login/cart ──►│    CanteenSystem     │
//!   checkout      └──┬────────────────┬──┘
//!                    │ AccountClient  │ ReadyTimerClient
//!                    ▼                ▼
//!           ┌──────────────┐   ┌──────────────┐
//!           │ account actor│   │ ready timer  │──► notification board
//!           └──────┬───────┘   └──────────────┘
//!                  │ AccountContext
//!                  ▼
//!            UserRecords ──► KeyValueStore
//! ```
//!
//! The store is injected into the account actor through its context when it starts running, the
//! same late binding the resource actors use everywhere.
//!
//! ## Checkout ordering
//!
//! 1. The draft's lines are checked against the total.
//! 2. The account actor deducts the total; an insufficient balance stops here, untouched.
//! 3. The ready timer starts. If it cannot, the order still stands and the failure is logged.
//! 4. The order is appended to the history and the cart is emptied.
//!
//! ## Graceful Shutdown
//!
//! [`CanteenSystem::shutdown`] drops both clients and awaits the actor tasks. Timer tasks still
//! sleeping find their actor gone and exit without effect.

pub mod canteen_system;
pub mod error;

pub use canteen_system::*;
pub use error::*;
