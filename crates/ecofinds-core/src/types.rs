//! # Domain Types
//!
//! Core domain types used throughout EcoFinds.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product_id     │   │  id             │       │
//! │  │  title, price   │   │  title (frozen) │──►│  items (copies) │       │
//! │  │  category       │   │  price (frozen) │   │  total (frozen) │       │
//! │  │  seller_id      │   │  quantity       │   │  date, status   │       │
//! │  │  status         │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Category      │   │  ProductStatus  │   │  UserProfile    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Electronics    │   │  Available      │   │  id, email      │       │
//! │  │  Fashion, Home  │   │  Sold           │   │  username       │       │
//! │  │  ...            │   │  Pending        │   │  join_date      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `CartItem` copies the product's display fields when it is added. Later
//! edits to the listing (or its deletion) do not reach into the cart, and a
//! `Purchase` copies the cart items again at checkout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Closed set of listing categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Electronics,
    Fashion,
    Home,
    Furniture,
    Books,
    Sports,
    Music,
    Toys,
    Other,
}

impl Category {
    /// Every category, in the order the category picker shows them.
    pub const ALL: [Category; 9] = [
        Category::Electronics,
        Category::Fashion,
        Category::Home,
        Category::Furniture,
        Category::Books,
        Category::Sports,
        Category::Music,
        Category::Toys,
        Category::Other,
    ];

    /// Display name, identical to the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::Home => "Home",
            Category::Furniture => "Furniture",
            Category::Books => "Books",
            Category::Sports => "Sports",
            Category::Music => "Music",
            Category::Toys => "Toys",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.to_string()).collect(),
            })
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// Category restriction for catalog search.
///
/// `All` is the sentinel the category bar shows first; it is a filter
/// value, never a category a listing can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Sentinel label for the unrestricted filter.
    pub const ALL_LABEL: &'static str = "All";

    /// Checks whether a listing in `category` passes this filter.
    #[inline]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(Self::ALL_LABEL) {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

// =============================================================================
// Product Status
// =============================================================================

/// Lifecycle state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Listed and purchasable.
    #[default]
    Available,
    /// Sold to a buyer.
    Sold,
    /// Reserved, awaiting the seller.
    Pending,
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductStatus::Available => write!(f, "available"),
            ProductStatus::Sold => write!(f, "sold"),
            ProductStatus::Pending => write!(f, "pending"),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A marketplace listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, immutable once created.
    pub id: String,

    pub title: String,

    pub description: String,

    /// Asking price, always positive.
    pub price: Money,

    pub category: Category,

    /// URL of the listing photo (not validated).
    pub image: String,

    /// Seller identity, copied from the session at creation time.
    pub seller_id: String,
    pub seller_name: String,

    /// Creation date, never mutated.
    #[ts(as = "String")]
    pub date_posted: NaiveDate,

    pub status: ProductStatus,
}

impl Product {
    /// Builds a listing from a submission plus store-assigned fields.
    pub fn from_new(id: String, date_posted: NaiveDate, new: NewProduct) -> Self {
        Product {
            id,
            title: new.title,
            description: new.description,
            price: new.price,
            category: new.category,
            image: new.image,
            seller_id: new.seller_id,
            seller_name: new.seller_name,
            date_posted,
            status: new.status,
        }
    }

    /// Checks if the listing can be bought right now.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Available
    }

    /// Case-insensitive substring match against title or description.
    ///
    /// `needle` must already be lowercased. An empty needle matches
    /// every listing.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Merges a partial update. `id`, `date_posted` and seller identity
    /// are not reachable through [`ProductUpdate`].
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// A listing submission: every product field except `id` and `date_posted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: Money,
    pub category: Category,
    pub image: String,
    pub seller_id: String,
    pub seller_name: String,
    #[serde(default)]
    pub status: ProductStatus,
}

/// Partial listing edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<Category>,
    pub image: Option<String>,
    pub status: Option<ProductStatus>,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A quantity of one product held in the cart.
///
/// ## Design Notes
/// - `product_id`: weak reference, the catalog may delete the listing
/// - `title`, `price`, `image`, `category`: frozen copy taken when the
///   product was first added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub title: String,
    /// Price at time of adding (frozen).
    pub price: Money,
    pub image: String,
    pub category: Category,
    /// Always >= 1 while the item is in a cart.
    pub quantity: i64,
}

impl CartItem {
    /// Creates a new cart item from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category,
            quantity,
        }
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> CoreResult<Money> {
        self.price
            .checked_mul(self.quantity)
            .ok_or(CoreError::TotalOverflow)
    }

    /// Sum of line totals over `items`.
    pub fn total_of(items: &[CartItem]) -> CoreResult<Money> {
        items.iter().try_fold(Money::zero(), |acc, item| {
            acc.checked_add(item.line_total()?)
                .ok_or(CoreError::TotalOverflow)
        })
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// The status of a purchase record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    #[default]
    Completed,
    Pending,
    Cancelled,
}

/// An immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    /// Cart items at time of purchase (copied, not referenced).
    pub items: Vec<CartItem>,
    /// Sum of line totals, computed once and frozen.
    pub total: Money,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub status: PurchaseStatus,
}

impl Purchase {
    /// Freezes a set of cart items into a completed purchase.
    pub fn completed(id: String, date: NaiveDate, items: Vec<CartItem>) -> CoreResult<Self> {
        let total = CartItem::total_of(&items)?;
        Ok(Purchase {
            id,
            items,
            total,
            date,
            status: PurchaseStatus::Completed,
        })
    }

    /// Total quantity of all items in this purchase.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// User Profile
// =============================================================================

/// The signed-in user's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Set at registration, never mutated.
    #[ts(as = "String")]
    pub join_date: NaiveDate,
}

impl UserProfile {
    /// A freshly registered profile with only the identity fields set.
    pub fn new(id: String, email: String, username: String, join_date: NaiveDate) -> Self {
        UserProfile {
            id,
            email,
            username,
            first_name: None,
            last_name: None,
            phone: None,
            address: None,
            join_date,
        }
    }

    /// Merges a partial profile edit. `id`, `email` and `join_date` stay.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(first_name) = update.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = update.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
    }
}

/// Partial profile edit from the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
