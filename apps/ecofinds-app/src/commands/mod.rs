//! # Commands Module
//!
//! Every call the mobile front-end can make.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Browse, search, listing CRUD, my listings
//! ├── cart.rs     ◄─── Cart manipulation, checkout, purchase history
//! └── session.rs  ◄─── Login, register, profile
//! ```
//!
//! ## Store Injection
//! Each command takes only the stores it touches:
//! ```rust,ignore
//! // Only needs the catalog
//! fn search_products(catalog: &CatalogStore, ...)
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartStore)
//!
//! // Needs both
//! fn add_to_cart(catalog: &CatalogStore, cart: &CartStore, ...)
//! ```
//!
//! Requests arrive as camelCase JSON, responses leave the same way, and
//! failures are [`ApiError`](crate::error::ApiError).

pub mod cart;
pub mod product;
pub mod session;

use crate::error::ApiError;

/// Result type for every command.
pub type CommandResult<T> = Result<T, ApiError>;
