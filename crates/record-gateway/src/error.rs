//! # Gateway Errors
//!
//! Every failed gateway call surfaces as a [`GatewayError`]. Callers are not expected
//! to classify it further; its `Display` text is the message shown to the operator.

/// Errors that can occur while talking to a collection.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway closed")]
    Closed,
    #[error("Gateway dropped response channel")]
    Dropped,
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    /// The record itself refused the operation (e.g. a required field was empty).
    #[error("{0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Shorthand for a rejection carrying only a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        let message: String = message.into();
        GatewayError::Rejected(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_bare_message() {
        let err = GatewayError::rejected("name is required");
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn unavailable_names_the_cause() {
        let err = GatewayError::Unavailable("connection reset".into());
        assert_eq!(err.to_string(), "Service unavailable: connection reset");
    }
}
