//! Errors raised by the actor runtime itself, independent of any entity.

/// Errors that can occur within the actor runtime.
///
/// Entity-specific failures travel inside [`FrameworkError::EntityError`] and are
/// recovered by the typed clients with a downcast.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers a concrete entity error, handing the original back on mismatch.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(concrete) => Ok(*concrete),
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
    #[error("boom")]
    struct Boom;

    #[test]
    fn downcast_recovers_entity_error() {
        let err = FrameworkError::EntityError(Box::new(Boom));
        assert_eq!(err.downcast_entity::<Boom>().unwrap(), Boom);
    }

    #[test]
    fn downcast_keeps_transport_errors() {
        let err = FrameworkError::ActorClosed;
        assert!(matches!(
            err.downcast_entity::<Boom>(),
            Err(FrameworkError::ActorClosed)
        ));
    }
}
