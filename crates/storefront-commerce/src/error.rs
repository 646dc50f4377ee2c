//! Commerce error types.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised by cart, address, favorites and storage operations.
///
/// Variant selection and price projection never fail; they signal through
/// return values instead.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Address not found.
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Address failed validation; one message per offending field.
    #[error("Invalid address: {}", format_fields(.0))]
    InvalidAddress(BTreeMap<String, String>),

    /// Operation requires a signed-in user.
    #[error("Authentication required")]
    Unauthenticated,

    /// Record belongs to another user.
    #[error("Not permitted: {0}")]
    Forbidden(String),

    /// Backing store failure.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

fn format_fields(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for CommerceError {
    fn from(e: std::io::Error) -> Self {
        CommerceError::StorageError(e.to_string())
    }
}
