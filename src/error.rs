//! Query errors surfaced to the user

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a city name";
pub const NOT_FOUND_MESSAGE: &str = "City not found";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data";

/// Coarse error classification kept in state alongside the message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ErrorKind {
    /// Blank input, no request made
    EmptyInput,
    /// Provider answered with a non-success status
    NotFound,
    /// Network, body read or body shape failure
    Transport,
}

/// A failed submission. `Display` is the exact text shown in the error banner.
///
/// Every non-2xx status collapses into [`QueryError::NotFound`]; the provider
/// does not get to distinguish a missing city from an auth failure or outage.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum QueryError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
    #[error("{0}")]
    Transport(String),
}

impl QueryError {
    /// Transport error from an underlying failure description.
    ///
    /// Blank descriptions fall back to the generic fetch failure text.
    pub fn transport(description: impl Into<String>) -> Self {
        let description = description.into();
        if description.trim().is_empty() {
            QueryError::Transport(FETCH_FAILED_MESSAGE.to_string())
        } else {
            QueryError::Transport(description)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::EmptyInput => ErrorKind::EmptyInput,
            QueryError::NotFound => ErrorKind::NotFound,
            QueryError::Transport(_) => ErrorKind::Transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_banner_text() {
        assert_eq!(QueryError::EmptyInput.to_string(), "Please enter a city name");
        assert_eq!(QueryError::NotFound.to_string(), "City not found");
        assert_eq!(
            QueryError::transport("connection refused").to_string(),
            "connection refused"
        );
    }

    #[test]
    fn blank_transport_description_uses_fallback() {
        let err = QueryError::transport("   ");
        assert_eq!(err.to_string(), FETCH_FAILED_MESSAGE);
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
