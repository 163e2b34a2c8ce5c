use casemall_sdk::{CasemallError, StockError};
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Product not found: {id}")]
    ProductNotFound { id: i64 },

    #[error("Product model not found: {id}")]
    ProductModelNotFound { id: i64 },

    #[error("Cart not found for user: {user_id}")]
    CartNotFound { user_id: String },

    #[error("Cart item not found: {id}")]
    CartItemNotFound { id: i64 },

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order item not found for cart item: {cart_item_id}")]
    OrderItemNotFound { cart_item_id: i64 },

    #[error("Product stock is insufficient (model {model_id}: requested {requested}, available {available})")]
    OutOfStock {
        model_id: i64,
        requested: i32,
        available: i32,
    },

    #[error("At least one product model with stock is required")]
    NoValidModels,

    #[error("At least one product image is required")]
    EmptyImageList,

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::UserNotFound {
            user_id: user_id.into(),
        }
    }

    pub fn product_not_found(id: i64) -> Self {
        Self::ProductNotFound { id }
    }

    pub fn product_model_not_found(id: i64) -> Self {
        Self::ProductModelNotFound { id }
    }

    pub fn cart_not_found(user_id: impl Into<String>) -> Self {
        Self::CartNotFound {
            user_id: user_id.into(),
        }
    }

    pub fn cart_item_not_found(id: i64) -> Self {
        Self::CartItemNotFound { id }
    }

    pub fn order_not_found(what: impl Into<String>) -> Self {
        Self::OrderNotFound(what.into())
    }

    pub fn order_item_not_found(cart_item_id: i64) -> Self {
        Self::OrderItemNotFound { cart_item_id }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<StockError> for DomainError {
    fn from(e: StockError) -> Self {
        match e {
            StockError::Insufficient {
                model_id,
                requested,
                available,
            } => Self::OutOfStock {
                model_id,
                requested,
                available,
            },
            StockError::NegativeQuantity(_) | StockError::Overflow { .. } => {
                Self::validation("stock", e.to_string())
            }
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for CasemallError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::UserNotFound { user_id } => CasemallError::not_found("user", user_id),
            DomainError::ProductNotFound { id } => CasemallError::not_found("product", id),
            DomainError::ProductModelNotFound { id } => {
                CasemallError::not_found("product model", id)
            }
            DomainError::CartNotFound { user_id } => CasemallError::not_found("cart", user_id),
            DomainError::CartItemNotFound { id } => CasemallError::not_found("cart item", id),
            DomainError::OrderNotFound(what) => CasemallError::not_found("order", what),
            DomainError::OrderItemNotFound { cart_item_id } => {
                CasemallError::not_found("order item", cart_item_id)
            }
            e @ DomainError::OutOfStock { .. } => CasemallError::out_of_stock(e.to_string()),
            DomainError::Forbidden { message } => CasemallError::forbidden(message),
            e @ (DomainError::NoValidModels | DomainError::EmptyImageList) => {
                CasemallError::validation(e.to_string())
            }
            DomainError::Validation { field, message } => {
                CasemallError::validation(format!("{field}: {message}"))
            }
            DomainError::Storage { .. } | DomainError::Database { .. } => {
                CasemallError::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_becomes_out_of_stock() {
        let e: DomainError = StockError::Insufficient {
            model_id: 3,
            requested: 5,
            available: 2,
        }
        .into();
        assert!(matches!(
            e,
            DomainError::OutOfStock {
                model_id: 3,
                requested: 5,
                available: 2
            }
        ));
        assert!(matches!(
            CasemallError::from(e),
            CasemallError::OutOfStock { .. }
        ));
    }

    #[test]
    fn storage_details_are_not_exposed() {
        let sdk = CasemallError::from(DomainError::database("connection reset"));
        assert_eq!(sdk.to_string(), "Internal error");
    }
}
