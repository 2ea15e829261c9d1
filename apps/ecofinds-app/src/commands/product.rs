//! # Product Commands
//!
//! Browsing, searching and managing listings.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  User types "lamp", taps the "Home" chip                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  search_products("lamp", Some("Home"))                                 │
//! │       │                                                                 │
//! │       ├── query > 100 chars? ──► VALIDATION_ERROR                      │
//! │       ├── unknown category?  ──► VALIDATION_ERROR                      │
//! │       │   ("All" or none means no restriction)                         │
//! │       ▼                                                                 │
//! │  CatalogStore::search ── available listings only                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product> to the front-end                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ecofinds_core::validation::validate_search_query;
use ecofinds_core::{Category, CategoryFilter, Money, NewProduct, Product, ProductStatus, ProductUpdate};
use ecofinds_store::{CatalogStore, MarketplaceConfig, SessionStore};

use super::CommandResult;
use crate::error::ApiError;

/// Listing form as submitted by the "Add product" screen.
///
/// `price` is the raw text from the price field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Edit form; absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub status: Option<ProductStatus>,
}

impl TryFrom<UpdateListingRequest> for ProductUpdate {
    type Error = ApiError;

    fn try_from(req: UpdateListingRequest) -> Result<Self, Self::Error> {
        Ok(ProductUpdate {
            title: req.title,
            description: req.description,
            price: req.price.as_deref().map(Money::parse).transpose()?,
            category: req
                .category
                .as_deref()
                .map(str::parse::<Category>)
                .transpose()?,
            image: req.image,
            status: req.status,
        })
    }
}

/// All listings, newest first.
pub fn list_products(catalog: &CatalogStore) -> Vec<Product> {
    catalog.list()
}

/// Searches available listings by text and category.
///
/// ## Arguments
/// * `query` - matched against title and description, case-insensitive
/// * `category` - category name, `"All"` or `None` for every category
pub fn search_products(
    catalog: &CatalogStore,
    query: &str,
    category: Option<&str>,
) -> CommandResult<Vec<Product>> {
    let query = validate_search_query(query)?;
    let filter = match category {
        Some(name) => name.parse::<CategoryFilter>()?,
        None => CategoryFilter::All,
    };

    Ok(catalog.search(&query, filter))
}

/// Fetches one listing for the detail screen.
pub fn get_product_by_id(catalog: &CatalogStore, id: &str) -> CommandResult<Product> {
    catalog
        .get_by_id(id)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

/// Publishes a listing for the signed-in user.
///
/// ## Behavior
/// - Requires a session; the seller is the current user
/// - Price text is parsed to cents (at most two decimals)
/// - Missing image falls back to the configured placeholder
pub fn create_listing(
    session: &SessionStore,
    catalog: &CatalogStore,
    config: &MarketplaceConfig,
    req: CreateListingRequest,
) -> CommandResult<Product> {
    let seller = session
        .user()
        .ok_or_else(|| ApiError::unauthorized("Please sign in to list a product"))?;

    let new = NewProduct {
        title: req.title,
        description: req.description,
        price: Money::parse(&req.price)?,
        category: req.category.parse()?,
        image: req
            .image
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| config.default_product_image.clone()),
        seller_id: seller.id,
        seller_name: seller.username,
        status: ProductStatus::Available,
    };

    let product = catalog.create(new)?;
    info!(product_id = %product.id, seller = %product.seller_name, "create_listing command");
    Ok(product)
}

/// Edits a listing.
pub fn update_listing(
    catalog: &CatalogStore,
    id: &str,
    req: UpdateListingRequest,
) -> CommandResult<Product> {
    debug!(product_id = %id, "update_listing command");
    let update = ProductUpdate::try_from(req)?;
    Ok(catalog.update(id, update)?)
}

/// Deletes a listing and returns it.
pub fn delete_listing(catalog: &CatalogStore, id: &str) -> CommandResult<Product> {
    debug!(product_id = %id, "delete_listing command");
    Ok(catalog.delete(id)?)
}

/// Listings created by the signed-in user; empty when signed out.
pub fn my_listings(session: &SessionStore, catalog: &CatalogStore) -> Vec<Product> {
    match session.user_id() {
        Some(user_id) => catalog.my_listings(&user_id),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use ecofinds_store::Marketplace;

    fn market() -> Marketplace {
        Marketplace::init(&MarketplaceConfig {
            auth_latency_ms: 0,
            ..Default::default()
        })
    }

    fn lamp_form() -> CreateListingRequest {
        CreateListingRequest {
            title: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            price: "19.99".to_string(),
            category: "Home".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_search_products_category_names() {
        let market = market();

        let all = search_products(&market.catalog, "", Some("All")).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(search_products(&market.catalog, "", None).unwrap(), all);

        let fashion = search_products(&market.catalog, "", Some("fashion")).unwrap();
        assert_eq!(fashion.len(), 2);

        let err = search_products(&market.catalog, "", Some("Spaceships")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = search_products(&market.catalog, &"x".repeat(101), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_search_products_trims_query() {
        let market = market();

        let hits = search_products(&market.catalog, "  Guitar Acoustic ", None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "5");
        assert!(market
            .catalog
            .search("  Guitar Acoustic ", CategoryFilter::All)
            .is_empty());
    }

    #[test]
    fn test_get_product_by_id() {
        let market = market();
        assert_eq!(
            get_product_by_id(&market.catalog, "2").unwrap().title,
            "MacBook Air 2020"
        );
        assert_eq!(
            get_product_by_id(&market.catalog, "nope").unwrap_err(),
            ApiError::not_found("Product", "nope")
        );
    }

    #[test]
    fn test_create_listing_requires_session() {
        let market = market();
        let err = create_listing(&market.session, &market.catalog, market.config(), lamp_form())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(market.catalog.len(), 5);
    }

    #[tokio::test]
    async fn test_create_listing_as_current_user() {
        let market = market();
        market.session.login("demo@ecofinds.com", "pw").await.unwrap();

        let product =
            create_listing(&market.session, &market.catalog, market.config(), lamp_form()).unwrap();

        assert_eq!(product.price.cents(), 1999);
        assert_eq!(product.category, Category::Home);
        assert_eq!(product.seller_id, "1");
        assert_eq!(product.seller_name, "ecouser");
        assert_eq!(product.image, market.config().default_product_image);
        assert_eq!(my_listings(&market.session, &market.catalog), vec![product]);
    }

    #[tokio::test]
    async fn test_create_listing_rejects_bad_form() {
        let market = market();
        market.session.login("demo@ecofinds.com", "pw").await.unwrap();

        for price in ["", "abc", "0", "1.999"] {
            let mut form = lamp_form();
            form.price = price.to_string();
            let err = create_listing(&market.session, &market.catalog, market.config(), form)
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "price {:?}", price);
        }

        let mut form = lamp_form();
        form.category = "All".to_string();
        assert!(create_listing(&market.session, &market.catalog, market.config(), form).is_err());
        assert_eq!(market.catalog.len(), 5);
    }

    #[test]
    fn test_update_and_delete_listing() {
        let market = market();
        let updated = update_listing(
            &market.catalog,
            "3",
            UpdateListingRequest {
                price: Some("120".to_string()),
                status: Some(ProductStatus::Sold),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.price.cents(), 12_000);
        assert_eq!(updated.status, ProductStatus::Sold);

        let err = update_listing(&market.catalog, "missing", UpdateListingRequest::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        delete_listing(&market.catalog, "3").unwrap();
        assert_eq!(
            delete_listing(&market.catalog, "3").unwrap_err().code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_my_listings_empty_when_signed_out() {
        let market = market();
        assert!(my_listings(&market.session, &market.catalog).is_empty());
    }

    #[test]
    fn test_create_request_from_json() {
        let req: CreateListingRequest = serde_json::from_str(
            r#"{"title":"Lamp","description":"Desk lamp","price":"19.99","category":"Home"}"#,
        )
        .unwrap();
        assert_eq!(req.image, None);
        assert_eq!(req.price, "19.99");
    }
}
