//! # Validation Module
//!
//! Input validation utilities for EcoFinds.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Mobile front-end                                             │
//! │  ├── Required-field checks on the forms                                │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command layer (Rust)                                         │
//! │  ├── Parsing (price text, category name)                               │
//! │  └── Search query limits                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Stores                                                       │
//! │  └── THIS MODULE: invariants enforced before any mutation              │
//! │      (price in range, non-empty title)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ecofinds_core::validation::{validate_email, validate_title};
//!
//! validate_title("Vintage Leather Jacket").unwrap();
//! assert!(validate_email("not-an-email").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewProduct, ProductUpdate, ProfileUpdate};
use crate::{MAX_DESCRIPTION_LEN, MAX_PRICE_CENTS, MAX_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a listing title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 100 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    validate_required_text("title", title, MAX_TITLE_LEN)
}

/// Validates a listing description.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 2000 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    validate_required_text("description", description, MAX_DESCRIPTION_LEN)
}

/// Validates a username.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    validate_required_text("username", username, 50)
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must have a non-empty local part and domain around a single `@`
///
/// This is a shape check for the sign-up form, not deliverability.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches every listing)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a listing price.
///
/// ## Rules
/// - Must be strictly positive; free listings are not allowed
/// - At most `MAX_PRICE_CENTS` ($10,000,000.00)
///
/// ## Example
/// ```rust
/// use ecofinds_core::money::Money;
/// use ecofinds_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1999)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 1,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates a full listing submission.
pub fn validate_new_product(new: &NewProduct) -> ValidationResult<()> {
    validate_title(&new.title)?;
    validate_description(&new.description)?;
    validate_price(new.price)?;
    Ok(())
}

/// Validates the fields present in a partial listing edit.
pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    if let Some(title) = &update.title {
        validate_title(title)?;
    }
    if let Some(description) = &update.description {
        validate_description(description)?;
    }
    if let Some(price) = update.price {
        validate_price(price)?;
    }
    Ok(())
}

/// Validates the fields present in a partial profile edit.
pub fn validate_profile_update(update: &ProfileUpdate) -> ValidationResult<()> {
    if let Some(username) = &update.username {
        validate_username(username)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
