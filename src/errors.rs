//! Unified error types and result handling.
//!
//! All fallible operations in the crate return [`Result`], so errors from the
//! storage layer, configuration loading, and business-rule validation flow
//! through a single enum. The HTTP layer maps these variants onto status
//! codes in one place.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Caller-supplied input failed validation
    #[error("Validation error: {message}")]
    Validation {
        /// Which input was rejected and why
        message: String,
    },

    /// A cart entry or order item carried a non-positive quantity
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// A monetary or stock amount was out of range
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount, in minor currency units
        amount: i64,
    },

    /// A referenced product does not exist in the catalog
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// The product id that failed to resolve
        id: i64,
    },

    /// A referenced order does not exist
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// The order id that failed to resolve
        id: i64,
    },

    /// Underlying store read or write failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem operation failed (uploads, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
