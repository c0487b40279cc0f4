use crate::account_actor::AccountError;
use crate::auth::Role;
use crate::ready_timer::ReadyTimerError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors surfaced by [`CanteenSystem`](super::CanteenSystem).
#[derive(Debug, Error)]
pub enum CanteenError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("This action requires the {required} role")]
    Forbidden { required: Role },

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Please select a serve option")]
    MissingServeOption,

    #[error("{0} is not on the menu")]
    UnknownMenuItem(String),

    #[error("No order at position {0}")]
    OrderIndexOutOfRange(usize),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    ReadyTimer(#[from] ReadyTimerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Actor task failed: {0}")]
    Shutdown(String),
}

impl CanteenError {
    pub fn is_insufficient_balance(&self) -> bool {
        matches!(
            self,
            CanteenError::Account(AccountError::InsufficientBalance { .. })
        )
    }
}
