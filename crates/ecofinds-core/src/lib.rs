//! # ecofinds-core: Pure Domain Logic for EcoFinds
//!
//! This crate is the **heart** of the EcoFinds marketplace. It contains the
//! domain types and rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EcoFinds Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile Front-end                             │   │
//! │  │    Browse ──► Product Detail ──► Cart ──► Purchases ──► Profile │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ecofinds-store                               │   │
//! │  │        CatalogStore   •   CartStore   •   SessionStore          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ecofinds-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CoreError │  │   rules   │  │   │
//! │  │   │  Purchase │  │   parse   │  │           │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • NO CLOCKS • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, Purchase, UserProfile, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Listing, cart and profile rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use ecofinds_core::money::Money;
//!
//! // Parse a price typed into the listing form
//! let price = Money::parse("19.99").unwrap();
//!
//! // Two lamps in the cart
//! let total = price.checked_mul(2).unwrap();
//! assert_eq!(total.to_string(), "$39.98");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use ecofinds_core::Money` instead of
// `use ecofinds_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Highest listing price accepted, in cents ($10,000,000.00).
///
/// Keeps `price * quantity` far away from the `i64` limit for any
/// realistic cart.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

/// Maximum length of a listing title.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum length of a listing description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;
