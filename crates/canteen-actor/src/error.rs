//! # Framework Errors
//!
//! Errors raised by the plumbing itself (closed channels, missing keys) plus a boxed wrapper for
//! whatever the entity's own hooks returned.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an [`FrameworkError::EntityError`].
    ///
    /// Returns the framework error unchanged when it is a plumbing error or wraps a different
    /// error type, so callers can fall back to their generic mapping.
    pub fn into_entity_error<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("balance too low")]
    struct LowBalance;

    #[test]
    fn entity_error_downcasts_to_its_own_type() {
        let err = FrameworkError::EntityError(Box::new(LowBalance));
        assert_eq!(err.into_entity_error::<LowBalance>().unwrap(), LowBalance);
    }

    #[test]
    fn plumbing_errors_pass_through() {
        let err = FrameworkError::ActorClosed.into_entity_error::<LowBalance>();
        assert!(matches!(err, Err(FrameworkError::ActorClosed)));

        let foreign = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        let err = foreign.into_entity_error::<LowBalance>();
        assert!(matches!(err, Err(FrameworkError::EntityError(_))));
    }
}
