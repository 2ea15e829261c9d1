//! # Store Error Types
//!
//! Errors returned by the catalog, cart and session stores.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Lookup      │  │    Session      │  │     Domain              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound       │  │  AuthFailed     │  │  Core(CoreError)        │ │
//! │  │  (product,      │  │  NotAuthenti-   │  │  Validation(...)        │ │
//! │  │   cart item)    │  │  cated          │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ecofinds_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A lookup by id found nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The authenticator rejected the credentials.
    #[error("Invalid email or password")]
    AuthFailed,

    /// The operation needs a signed-in user.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Domain rule violation from ecofinds-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Shorthand for a missing product.
    pub fn product_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: "Product",
            id: id.into(),
        }
    }

    /// Shorthand for a product id that is not in the cart.
    pub fn cart_item_not_found(product_id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: "Cart item",
            id: product_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            StoreError::product_not_found("42").to_string(),
            "Product not found: 42"
        );
        assert_eq!(
            StoreError::cart_item_not_found("7").to_string(),
            "Cart item not found: 7"
        );
    }

    #[test]
    fn test_wrapped_errors_are_transparent() {
        let err: StoreError = ValidationError::Required {
            field: "title".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "title is required");

        let err: StoreError = CoreError::TotalOverflow.into();
        assert_eq!(err.to_string(), "Cart total exceeds the largest supported amount");
    }
}
