use axum::http::StatusCode;

use super::problem::{self, Problem, ValidationViolation};
use crate::domain::error::DomainError;

/// Map a domain error to an RFC 9457 Problem.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let problem = match e {
        DomainError::UserNotFound { .. } => problem::not_found(e.to_string()).with_code("USER_NOT_FOUND"),
        DomainError::ProductNotFound { .. } => {
            problem::not_found(e.to_string()).with_code("PRODUCT_NOT_FOUND")
        }
        DomainError::ProductModelNotFound { .. } => {
            problem::not_found(e.to_string()).with_code("PRODUCT_MODEL_NOT_FOUND")
        }
        DomainError::CartNotFound { .. } => problem::not_found(e.to_string()).with_code("CART_NOT_FOUND"),
        DomainError::CartItemNotFound { .. } => {
            problem::not_found(e.to_string()).with_code("CART_ITEM_NOT_FOUND")
        }
        DomainError::OrderNotFound(_) => problem::not_found(e.to_string()).with_code("ORDER_NOT_FOUND"),
        DomainError::OrderItemNotFound { .. } => {
            problem::not_found(e.to_string()).with_code("ORDER_ITEM_NOT_FOUND")
        }
        DomainError::OutOfStock { .. } => problem::conflict(e.to_string()).with_code("OUT_OF_STOCK"),
        DomainError::Forbidden { message } => problem::forbidden(message.clone()),
        DomainError::NoValidModels => problem::unprocessable("models", e.to_string())
            .with_code("NO_VALID_MODELS"),
        DomainError::EmptyImageList => problem::unprocessable("images", e.to_string())
            .with_code("EMPTY_IMAGE_LIST"),
        DomainError::Validation { field, message } => Problem::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Validation Failed",
            e.to_string(),
        )
        .with_code("VALIDATION_ERROR")
        .with_errors(vec![ValidationViolation {
            field: field.clone(),
            message: message.clone(),
        }]),
        DomainError::Storage { .. } | DomainError::Database { .. } => {
            // details stay in the log
            tracing::error!(error = ?e, "Internal error while handling request");
            problem::internal_error("An internal error occurred")
        }
    };
    problem.with_instance(instance)
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        // instance is filled in by `problem_context_middleware`
        domain_error_to_problem(&e, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_stock_is_conflict() {
        let p = domain_error_to_problem(
            &DomainError::OutOfStock {
                model_id: 3,
                requested: 5,
                available: 2,
            },
            "/casemall/v1/order",
        );
        assert_eq!(p.status, StatusCode::CONFLICT);
        assert_eq!(p.code, "OUT_OF_STOCK");
        assert_eq!(p.instance, "/casemall/v1/order");
    }

    #[test]
    fn database_details_are_hidden() {
        let p: Problem = DomainError::database("UNIQUE constraint failed: users.email").into();
        assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!p.detail.contains("UNIQUE"));
    }

    #[test]
    fn validation_lists_the_field() {
        let p: Problem = DomainError::validation("count", "must be at least 1").into();
        assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(p.errors.unwrap()[0].field, "count");
    }

    #[test]
    fn forbidden_keeps_message() {
        let p: Problem = DomainError::forbidden("cart item 4 does not belong to user 'bob'").into();
        assert_eq!(p.status, StatusCode::FORBIDDEN);
        assert!(p.detail.contains("cart item 4"));
    }
}
