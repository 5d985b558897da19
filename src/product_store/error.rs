//! Error types for the Products collection.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// A required column was left empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Prices cannot be negative.
    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    /// The gateway call failed. Carries the gateway's own message.
    #[error("{0}")]
    Gateway(String),
}
