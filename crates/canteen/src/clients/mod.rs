//! Typed clients for the canteen's actors.

pub mod account_client;
pub mod ready_timer_client;

pub use account_client::AccountClient;
pub use ready_timer_client::ReadyTimerClient;
