//! Public error types for the `casemall` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

/// Stock arithmetic failures on a product model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    #[error("product stock is insufficient (model {model_id}: requested {requested}, available {available})")]
    Insufficient {
        model_id: i64,
        requested: i32,
        available: i32,
    },

    #[error("stock quantity must not be negative: {0}")]
    NegativeQuantity(i32),

    #[error("stock overflow on model {model_id}")]
    Overflow { model_id: i64 },
}

/// Errors that can be returned by the `CasemallClientV1`.
#[derive(Error, Debug, Clone)]
pub enum CasemallError {
    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Not enough stock to satisfy the request.
    #[error("Out of stock: {message}")]
    OutOfStock { message: String },

    /// The caller does not own the referenced resource.
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl CasemallError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn out_of_stock(message: impl Into<String>) -> Self {
        Self::OutOfStock {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
