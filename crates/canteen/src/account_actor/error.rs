//! Error types for the Account actor.

use crate::model::{Amount, InsufficientBalance};
use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// No account is loaded for this email.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The deduction exceeds the remaining allowance.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Amount, available: Amount },

    /// The dish is marked unavailable on the menu.
    #[error("{0} is not available right now")]
    ItemUnavailable(String),

    /// Quantities added to a cart must be at least one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("{0} is not in the cart")]
    NotInCart(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// A draft's lines do not add up to the total being charged.
    #[error("Order total {declared} does not match its items ({computed})")]
    TotalMismatch { declared: Amount, computed: Amount },

    /// The actor answered an action with the wrong kind of result.
    #[error("Unexpected action result: {0}")]
    UnexpectedResult(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<InsufficientBalance> for AccountError {
    fn from(e: InsufficientBalance) -> Self {
        AccountError::InsufficientBalance {
            requested: e.requested,
            available: e.available,
        }
    }
}
