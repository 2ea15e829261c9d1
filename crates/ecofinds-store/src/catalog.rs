//! # Catalog Store
//!
//! Owns every product listing.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Operations                                   │
//! │                                                                         │
//! │  Screen Action            Store Call              State Change          │
//! │  ─────────────            ──────────              ────────────          │
//! │                                                                         │
//! │  Post listing ──────────► create() ─────────────► products.insert(0)   │
//! │                                                                         │
//! │  Edit listing ──────────► update() ─────────────► products[i].apply()  │
//! │                                                                         │
//! │  Delete listing ────────► delete() ─────────────► products.remove(i)   │
//! │                                                                         │
//! │  Browse / search ───────► search() ─────────────► (read only)          │
//! │                                                                         │
//! │  My listings ───────────► my_listings() ────────► (read only)          │
//! │                                                                         │
//! │  Every write publishes the new list to all subscribers.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use ecofinds_core::validation::{validate_new_product, validate_product_update};
use ecofinds_core::{CategoryFilter, NewProduct, Product, ProductUpdate};

use crate::error::{StoreError, StoreResult};

/// Shared handle to the product list. Clones see the same listings.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Arc<watch::Sender<Vec<Product>>>,
}

impl CatalogStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    /// Creates a catalog holding `products`, newest first.
    pub fn with_products(products: Vec<Product>) -> Self {
        let (products, _) = watch::channel(products);
        CatalogStore {
            products: Arc::new(products),
        }
    }

    /// Executes a function with read access to the listings.
    fn with_products_ref<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Product]) -> R,
    {
        let products = self.products.borrow();
        f(&products)
    }

    /// All listings, most recently created first.
    pub fn list(&self) -> Vec<Product> {
        self.with_products_ref(|products| products.to_vec())
    }

    /// Number of listings of any status.
    pub fn len(&self) -> usize {
        self.with_products_ref(|products| products.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Publishes a new listing with a fresh id and today's date.
    pub fn create(&self, new: NewProduct) -> StoreResult<Product> {
        validate_new_product(&new)?;

        let product = Product::from_new(Uuid::new_v4().to_string(), Utc::now().date_naive(), new);
        self.products
            .send_modify(|products| products.insert(0, product.clone()));

        info!(
            product_id = %product.id,
            title = %product.title,
            price = %product.price,
            "Listing created"
        );
        Ok(product)
    }

    /// Merges `update` into the listing with `id`.
    pub fn update(&self, id: &str, update: ProductUpdate) -> StoreResult<Product> {
        validate_product_update(&update)?;

        let mut outcome = Err(StoreError::product_not_found(id));
        self.products.send_if_modified(|products| {
            match products.iter_mut().find(|p| p.id == id) {
                Some(product) => {
                    product.apply(update);
                    outcome = Ok(product.clone());
                    true
                }
                None => false,
            }
        });

        debug!(product_id = %id, ok = outcome.is_ok(), "Listing update");
        outcome
    }

    /// Removes the listing with `id` and returns it.
    ///
    /// Cart lines that reference it keep their snapshot.
    pub fn delete(&self, id: &str) -> StoreResult<Product> {
        let mut removed = None;
        self.products.send_if_modified(|products| {
            match products.iter().position(|p| p.id == id) {
                Some(index) => {
                    removed = Some(products.remove(index));
                    true
                }
                None => false,
            }
        });

        debug!(product_id = %id, ok = removed.is_some(), "Listing delete");
        removed.ok_or_else(|| StoreError::product_not_found(id))
    }

    /// Available listings whose title or description contains `query`
    /// (case-insensitive, taken as-is) and whose category passes `filter`.
    ///
    /// An empty query matches every available listing.
    pub fn search(&self, query: &str, filter: CategoryFilter) -> Vec<Product> {
        let needle = query.to_lowercase();

        let results: Vec<Product> = self.with_products_ref(|products| {
            products
                .iter()
                .filter(|p| p.is_available())
                .filter(|p| filter.matches(p.category))
                .filter(|p| p.matches_query(&needle))
                .cloned()
                .collect()
        });

        debug!(query = %needle, ?filter, count = results.len(), "Catalog search");
        results
    }

    pub fn get_by_id(&self, id: &str) -> Option<Product> {
        self.with_products_ref(|products| products.iter().find(|p| p.id == id).cloned())
    }

    /// Listings created by `seller_id`, any status.
    pub fn my_listings(&self, seller_id: &str) -> Vec<Product> {
        self.with_products_ref(|products| {
            products
                .iter()
                .filter(|p| p.seller_id == seller_id)
                .cloned()
                .collect()
        })
    }

    /// Observer channel; fires after every successful write.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.products.subscribe()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
