//! Error types for the ready-timer actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReadyTimerError {
    /// The actor is gone, or dropped the request without answering.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
