//! Error types for the Doctors collection.

use thiserror::Error;

/// Errors that can occur during doctor operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DoctorError {
    /// A required column was left empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The gateway call failed. Carries the gateway's own message.
    #[error("{0}")]
    Gateway(String),
}
