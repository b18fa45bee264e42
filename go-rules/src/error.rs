use std::fmt;

/// Usage errors. Neither kind is transient; retrying the same call fails the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    InvalidArgument(String),
    InvalidState(String),
}

impl GoError {
    pub(crate) fn argument(message: impl Into<String>) -> Self {
        GoError::InvalidArgument(message.into())
    }

    pub(crate) fn state(message: impl Into<String>) -> Self {
        GoError::InvalidState(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, GoError::InvalidArgument(_))
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, GoError::InvalidState(_))
    }
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            GoError::InvalidState(msg) => write!(f, "invalid state: {msg}"),
        }
    }
}

impl std::error::Error for GoError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            GoError::argument("bad point").to_string(),
            "invalid argument: bad point"
        );
        assert_eq!(
            GoError::state("game over").to_string(),
            "invalid state: game over"
        );
    }

    #[test]
    fn kind_predicates() {
        assert!(GoError::argument("x").is_invalid_argument());
        assert!(!GoError::argument("x").is_invalid_state());
        assert!(GoError::state("x").is_invalid_state());
    }
}
