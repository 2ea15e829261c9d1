//! # Cart Store
//!
//! Manages the current shopping cart and the purchase history.
//!
//! ## Thread Safety
//! The cart lines and the ledger live in one [`CartBook`] inside a
//! `watch` channel. Every write runs under the channel's lock, so checkout
//! moves the lines into a purchase and empties the cart in a single step:
//! no observer sees a purchase recorded while the cart is still full.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Screen Action            Store Call              CartBook Change       │
//! │  ─────────────            ──────────              ───────────────       │
//! │                                                                         │
//! │  Add to cart ───────────► add_to_cart() ────────► items.push / qty+1   │
//! │                                                                         │
//! │  Change Quantity ───────► update_quantity() ────► items[i].qty = n     │
//! │                                                                         │
//! │  Click Remove ──────────► remove_from_cart() ───► items.remove(i)      │
//! │                                                                         │
//! │  Click Clear ───────────► clear_cart() ─────────► items.clear()        │
//! │                                                                         │
//! │  Checkout ──────────────► checkout() ───────────► purchases.insert(0)  │
//! │                                                   + items.clear()      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use ecofinds_core::{CartItem, CoreError, CoreResult, Money, Product, Purchase};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Cart Book
// =============================================================================

/// Cart lines plus the purchase ledger.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding same product increases quantity)
/// - Every quantity is at least 1
/// - The cart total fits in `Money`; a write that would overflow it fails
///   with `TotalOverflow` and leaves the book unchanged
/// - Purchases are most recent first and never change once recorded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartBook {
    pub items: Vec<CartItem>,
    pub purchases: Vec<Purchase>,
}

impl CartBook {
    /// Starts with an empty cart and the given purchase history.
    pub fn with_purchases(purchases: Vec<Purchase>) -> Self {
        CartBook {
            items: Vec::new(),
            purchases,
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - If product already in cart: quantity + 1
    /// - If product not in cart: new line with quantity 1 and a snapshot of
    ///   the product's display fields
    pub fn add_item(&mut self, product: &Product) -> Result<CartItem, CoreError> {
        if !product.is_available() {
            return Err(CoreError::ProductUnavailable {
                product_id: product.id.clone(),
                status: product.status.to_string(),
            });
        }

        if let Some(index) = self.position(&product.id) {
            let new_qty = self.items[index]
                .quantity
                .checked_add(1)
                .ok_or(CoreError::TotalOverflow)?;
            self.ensure_total_fits(index, new_qty)?;

            let item = &mut self.items[index];
            item.quantity = new_qty;
            return Ok(item.clone());
        }

        let item = CartItem::from_product(product, 1);
        CartItem::total_of(&self.items)?
            .checked_add(product.price)
            .ok_or(CoreError::TotalOverflow)?;
        self.items.push(item.clone());
        Ok(item)
    }

    /// Sets (not adds to) the quantity of a line.
    ///
    /// ## Behavior
    /// - quantity <= 0: removes the line
    /// - product not in cart: `NotFound`
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> StoreResult<()> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        let index = self
            .position(product_id)
            .ok_or_else(|| StoreError::cart_item_not_found(product_id))?;
        self.ensure_total_fits(index, quantity)?;

        self.items[index].quantity = quantity;
        Ok(())
    }

    /// Removes a line by product ID.
    pub fn remove_item(&mut self, product_id: &str) -> StoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(StoreError::cart_item_not_found(product_id))
        } else {
            Ok(())
        }
    }

    /// Turns the current lines into a completed purchase.
    ///
    /// Returns `Ok(None)` and changes nothing when the cart is empty.
    pub fn checkout(
        &mut self,
        purchase_id: String,
        date: NaiveDate,
    ) -> CoreResult<Option<Purchase>> {
        if self.items.is_empty() {
            return Ok(None);
        }

        let purchase = Purchase::completed(purchase_id, date, self.items.clone())?;
        self.items.clear();
        self.purchases.insert(0, purchase.clone());
        Ok(Some(purchase))
    }

    /// Sum of `price * quantity` over every line.
    pub fn total_price(&self) -> CoreResult<Money> {
        CartItem::total_of(&self.items)
    }

    /// Sum of quantities over every line.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0, |acc: i64, i| acc.saturating_add(i.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product_id == product_id)
    }

    /// Checks the cart total with line `index` set to `quantity`.
    fn ensure_total_fits(&self, index: usize, quantity: i64) -> CoreResult<()> {
        let line = self.items[index]
            .price
            .checked_mul(quantity)
            .ok_or(CoreError::TotalOverflow)?;

        self.items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .try_fold(line, |acc, (_, item)| {
                acc.checked_add(item.line_total()?)
                    .ok_or(CoreError::TotalOverflow)
            })?;
        Ok(())
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Shared handle to the cart. Clones see the same cart and ledger.
#[derive(Debug, Clone)]
pub struct CartStore {
    book: Arc<watch::Sender<CartBook>>,
}

impl CartStore {
    /// Creates an empty cart with no purchase history.
    pub fn new() -> Self {
        Self::with_purchases(Vec::new())
    }

    /// Creates an empty cart on top of an existing ledger.
    pub fn with_purchases(purchases: Vec<Purchase>) -> Self {
        let (book, _) = watch::channel(CartBook::with_purchases(purchases));
        CartStore {
            book: Arc::new(book),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use ecofinds_store::CartStore;
    ///
    /// let cart = CartStore::new();
    /// let lines = cart.with_book(|book| book.items.len());
    /// assert_eq!(lines, 0);
    /// ```
    pub fn with_book<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartBook) -> R,
    {
        let book = self.book.borrow();
        f(&book)
    }

    /// Runs a fallible write on the line for `product_id`.
    /// Subscribers are only notified on success.
    fn try_modify<F, R>(&self, product_id: &str, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut CartBook) -> StoreResult<R>,
    {
        let mut outcome = Err(StoreError::cart_item_not_found(product_id));
        self.book.send_if_modified(|book| {
            outcome = f(book);
            outcome.is_ok()
        });
        outcome
    }

    /// Adds one unit of `product` to the cart.
    pub fn add_to_cart(&self, product: &Product) -> StoreResult<CartItem> {
        let item = self.try_modify(&product.id, |book| {
            book.add_item(product).map_err(StoreError::from)
        })?;
        debug!(product_id = %item.product_id, quantity = item.quantity, "Added to cart");
        Ok(item)
    }

    pub fn remove_from_cart(&self, product_id: &str) -> StoreResult<()> {
        self.try_modify(product_id, |book| book.remove_item(product_id))?;
        debug!(product_id, "Removed from cart");
        Ok(())
    }

    /// Sets a line's quantity; `quantity <= 0` removes the line.
    pub fn update_quantity(&self, product_id: &str, quantity: i64) -> StoreResult<()> {
        self.try_modify(product_id, |book| book.update_quantity(product_id, quantity))?;
        debug!(product_id, quantity, "Cart quantity updated");
        Ok(())
    }

    /// Empties the cart without recording a purchase.
    pub fn clear_cart(&self) {
        self.book.send_if_modified(|book| {
            let had_items = !book.items.is_empty();
            book.items.clear();
            had_items
        });
        debug!("Cart cleared");
    }

    /// Records the cart as a completed purchase and empties it.
    ///
    /// Returns `Ok(None)` on an empty cart; the ledger is left untouched.
    pub fn checkout(&self) -> StoreResult<Option<Purchase>> {
        let mut outcome = Ok(None);
        self.book.send_if_modified(|book| {
            outcome = book
                .checkout(Uuid::new_v4().to_string(), Utc::now().date_naive())
                .map_err(StoreError::from);
            matches!(outcome, Ok(Some(_)))
        });

        match &outcome {
            Ok(Some(purchase)) => info!(
                purchase_id = %purchase.id,
                total = %purchase.total,
                items = purchase.item_count(),
                "Checkout complete"
            ),
            Ok(None) => debug!("Checkout skipped, cart is empty"),
            Err(e) => warn!(error = %e, "Checkout failed"),
        }
        outcome
    }

    pub fn total_price(&self) -> StoreResult<Money> {
        Ok(self.with_book(CartBook::total_price)?)
    }

    pub fn total_items(&self) -> i64 {
        self.with_book(CartBook::total_items)
    }

    pub fn cart_items(&self) -> Vec<CartItem> {
        self.with_book(|book| book.items.clone())
    }

    /// Purchase history, most recent first.
    pub fn purchases(&self) -> Vec<Purchase> {
        self.with_book(|book| book.purchases.clone())
    }

    /// Observer channel; fires after every successful write.
    pub fn subscribe(&self) -> watch::Receiver<CartBook> {
        self.book.subscribe()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
