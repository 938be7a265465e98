use thiserror::Error;

/// Errors raised by body generation and surface mapping.
///
/// None of these are transient: a call either completes or fails with one of
/// these and should not be retried with the same arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanetGenError {
    /// Malformed or out-of-domain input, e.g. an empty name or a body type
    /// handed to a generator that does not build it.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced entity is missing from a catalog.
    #[error("not found: {0}")]
    NotFound(String),

    /// A combination that has not been built, e.g. a map for a body type
    /// without a mapper, or a draw path the mapper does not provide.
    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PlanetGenError>;

impl PlanetGenError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_category() {
        assert_eq!(
            PlanetGenError::invalid("bad digits").to_string(),
            "invalid argument: bad digits"
        );
        assert_eq!(
            PlanetGenError::unsupported("no mapper").to_string(),
            "unsupported: no mapper"
        );
        assert_eq!(
            PlanetGenError::NotFound("Unobtanium".into()).to_string(),
            "not found: Unobtanium"
        );
    }
}
