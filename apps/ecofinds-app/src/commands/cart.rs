//! # Cart Commands
//!
//! Cart manipulation, checkout and purchase history.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Purchase │       │
//! │  │  Cart    │     │          │     │          │     │ History  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add_to_cart                                          │
//! │                   update_cart_item                                     │
//! │                   remove_from_cart                                     │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use ecofinds_core::{CartItem, CoreError, Money, Purchase};
use ecofinds_store::{CartBook, CartStore, CatalogStore};

use super::CommandResult;
use crate::error::ApiError;

/// Cart totals summary for the cart screen footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines
    pub item_count: usize,
    /// Sum of quantities (the badge on the cart tab)
    pub total_quantity: i64,
    pub total: Money,
}

impl TryFrom<&CartBook> for CartTotals {
    type Error = CoreError;

    fn try_from(book: &CartBook) -> Result<Self, Self::Error> {
        Ok(CartTotals {
            item_count: book.items.len(),
            total_quantity: book.total_items(),
            total: book.total_price()?,
        })
    }
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl TryFrom<&CartBook> for CartResponse {
    type Error = CoreError;

    fn try_from(book: &CartBook) -> Result<Self, Self::Error> {
        Ok(CartResponse {
            items: book.items.clone(),
            totals: CartTotals::try_from(book)?,
        })
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart Screen                                                            │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  CART                                              3 items     │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Lamp                    x2              $39.98              │    │
/// │  │  Nike Running Shoes      x1              $45.99              │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  TOTAL                                   $85.97              │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                                                                         │
/// │  get_cart() → { items: [...], totals: {...} }                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartStore) -> CommandResult<CartResponse> {
    Ok(cart.with_book(|book| CartResponse::try_from(book))?)
}

/// Adds one unit of a listing to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases by one
/// - If product not in cart: added as new line
/// - Price is "frozen" at time of adding (won't change if the listing is edited)
pub fn add_to_cart(
    catalog: &CatalogStore,
    cart: &CartStore,
    product_id: &str,
) -> CommandResult<CartResponse> {
    debug!(product_id, "add_to_cart command");

    let product = catalog
        .get_by_id(product_id)
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    cart.add_to_cart(&product)?;
    get_cart(cart)
}

/// Sets the quantity of a line; 0 or less removes it.
///
/// Any positive quantity is accepted as long as the cart total still fits.
pub fn update_cart_item(
    cart: &CartStore,
    product_id: &str,
    quantity: i64,
) -> CommandResult<CartResponse> {
    debug!(product_id, quantity, "update_cart_item command");
    cart.update_quantity(product_id, quantity)?;
    get_cart(cart)
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartStore, product_id: &str) -> CommandResult<CartResponse> {
    debug!(product_id, "remove_from_cart command");
    cart.remove_from_cart(product_id)?;
    get_cart(cart)
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartStore) -> CommandResult<CartResponse> {
    cart.clear_cart();
    get_cart(cart)
}

/// Places the order for everything in the cart.
///
/// An empty cart is reported as `CART_ERROR`; nothing is recorded.
pub fn checkout(cart: &CartStore) -> CommandResult<Purchase> {
    cart.checkout()?.ok_or_else(|| ApiError::cart("Cart is empty"))
}

/// Purchase history, most recent first.
pub fn list_purchases(cart: &CartStore) -> Vec<Purchase> {
    cart.purchases()
}
