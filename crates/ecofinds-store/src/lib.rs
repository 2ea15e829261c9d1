//! # ecofinds-store: In-Memory Marketplace State
//!
//! Owns all mutable state of the EcoFinds front-end: the product catalog,
//! the cart with its purchase ledger, and the current session.
//!
//! ## How the Stores Fit Together
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Marketplace::init                               │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  CatalogStore    │  │    CartStore     │  │    SessionStore      │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  Vec<Product>    │  │  CartBook        │  │  SessionState        │  │
//! │  │                  │  │  items+purchases │  │  user, is_loading    │  │
//! │  └────────┬─────────┘  └────────▲─────────┘  └──────────┬───────────┘  │
//! │           │   &Product (copied) │                       │              │
//! │           └─────────────────────┘                       │ user id      │
//! │           ▲                                             │              │
//! │           └──────────── my_listings(user id) ◄──────────┘              │
//! │                                                                         │
//! │  Each store keeps its state in a tokio watch channel: writes are       │
//! │  atomic, reads see the latest write, observers get every change.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use ecofinds_store::{Marketplace, MarketplaceConfig};
//! use ecofinds_core::CategoryFilter;
//!
//! let market = Marketplace::init(&MarketplaceConfig::default());
//!
//! let guitars = market.catalog.search("guitar", CategoryFilter::All);
//! market.cart.add_to_cart(&guitars[0]).unwrap();
//! assert_eq!(market.cart.total_price().unwrap().to_string(), "$250.00");
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod seed;
pub mod session;

pub use auth::{Authenticator, DemoAuthenticator};
pub use cart::{CartBook, CartStore};
pub use catalog::CatalogStore;
pub use config::{ConfigError, MarketplaceConfig};
pub use error::{StoreError, StoreResult};
pub use session::{SessionState, SessionStore};

use std::sync::Arc;

use tracing::info;

/// The three stores, built once at startup.
///
/// Cloning is cheap and every clone shares the same state.
#[derive(Debug, Clone)]
pub struct Marketplace {
    pub catalog: CatalogStore,
    pub cart: CartStore,
    pub session: SessionStore,
    config: Arc<MarketplaceConfig>,
}

impl Marketplace {
    /// Builds the stores with the demo authenticator.
    pub fn init(config: &MarketplaceConfig) -> Self {
        Self::with_authenticator(config, Arc::new(DemoAuthenticator::from_config(config)))
    }

    /// Builds the stores around a caller-supplied authenticator.
    pub fn with_authenticator(config: &MarketplaceConfig, auth: Arc<dyn Authenticator>) -> Self {
        let (catalog, cart) = if config.seed_demo_data {
            (
                CatalogStore::with_products(seed::demo_products()),
                CartStore::with_purchases(seed::demo_purchases()),
            )
        } else {
            (CatalogStore::new(), CartStore::new())
        };

        info!(
            seeded = config.seed_demo_data,
            products = catalog.len(),
            "Marketplace initialized"
        );

        Marketplace {
            catalog,
            cart,
            session: SessionStore::new(auth),
            config: Arc::new(config.clone()),
        }
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_seeds_demo_data() {
        let market = Marketplace::init(&MarketplaceConfig::default());
        assert_eq!(market.catalog.len(), 5);
        assert_eq!(market.cart.purchases().len(), 1);
        assert!(market.cart.cart_items().is_empty());
        assert!(market.session.user().is_none());
    }

    #[test]
    fn test_init_without_seed() {
        let config = MarketplaceConfig {
            seed_demo_data: false,
            ..Default::default()
        };
        let market = Marketplace::init(&config);
        assert!(market.catalog.is_empty());
        assert!(market.cart.purchases().is_empty());
        assert!(!market.config().seed_demo_data);
    }

    #[tokio::test]
    async fn test_demo_account_uses_configured_email() {
        let config = MarketplaceConfig {
            demo_account_email: "tester@ecofinds.com".to_string(),
            auth_latency_ms: 0,
            ..Default::default()
        };
        let market = Marketplace::init(&config);

        assert!(market.session.login("demo@ecofinds.com", "pw").await.is_err());
        let user = market
            .session
            .login("tester@ecofinds.com", "pw")
            .await
            .unwrap();
        assert_eq!(user.email, "tester@ecofinds.com");
    }
}
