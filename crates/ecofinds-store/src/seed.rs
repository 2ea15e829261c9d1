//! Demo data loaded when `seed_demo_data` is on.

use chrono::NaiveDate;
use ecofinds_core::{
    CartItem, Category, Money, Product, ProductStatus, Purchase, PurchaseStatus, UserProfile,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    title: &str,
    description: &str,
    price: Money,
    category: Category,
    image: &str,
    seller: (&str, &str),
    date_posted: NaiveDate,
) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price,
        category,
        image: image.to_string(),
        seller_id: seller.0.to_string(),
        seller_name: seller.1.to_string(),
        date_posted,
        status: ProductStatus::Available,
    }
}

const JACKET_IMAGE: &str = "https://images.pexels.com/photos/1021693/pexels-photo-1021693.jpeg";

/// The five starter listings, newest first.
pub fn demo_products() -> Vec<Product> {
    vec![
        listing(
            "1",
            "Vintage Leather Jacket",
            "Beautiful vintage leather jacket in excellent condition. Perfect for casual outings and has a timeless style.",
            Money::from_major_minor(89, 99),
            Category::Fashion,
            JACKET_IMAGE,
            ("2", "FashionLover"),
            date(2024, 1, 15),
        ),
        listing(
            "2",
            "MacBook Air 2020",
            "Gently used MacBook Air 2020 with M1 chip. Great for students and professionals.",
            Money::from_major_minor(799, 99),
            Category::Electronics,
            "https://images.pexels.com/photos/205421/pexels-photo-205421.jpeg",
            ("3", "TechGuru"),
            date(2024, 1, 14),
        ),
        listing(
            "3",
            "Wooden Coffee Table",
            "Solid oak coffee table with unique grain pattern. Minor wear adds character.",
            Money::from_major_minor(150, 0),
            Category::Furniture,
            "https://images.pexels.com/photos/1350789/pexels-photo-1350789.jpeg",
            ("4", "HomeDesigner"),
            date(2024, 1, 13),
        ),
        listing(
            "4",
            "Nike Running Shoes",
            "Lightly worn Nike running shoes, size 9. Great for jogging and casual wear.",
            Money::from_major_minor(45, 99),
            Category::Fashion,
            "https://images.pexels.com/photos/2529148/pexels-photo-2529148.jpeg",
            ("5", "RunnerLife"),
            date(2024, 1, 12),
        ),
        listing(
            "5",
            "Guitar Acoustic",
            "Beautiful acoustic guitar in great condition. Perfect for beginners or professionals.",
            Money::from_major_minor(250, 0),
            Category::Music,
            "https://images.pexels.com/photos/1407322/pexels-photo-1407322.jpeg",
            ("6", "MusicMaker"),
            date(2024, 1, 11),
        ),
    ]
}

/// One earlier order of the leather jacket.
pub fn demo_purchases() -> Vec<Purchase> {
    let jacket = CartItem {
        product_id: "1".to_string(),
        title: "Vintage Leather Jacket".to_string(),
        price: Money::from_major_minor(89, 99),
        image: JACKET_IMAGE.to_string(),
        category: Category::Fashion,
        quantity: 1,
    };

    vec![Purchase {
        id: "1".to_string(),
        total: jacket.price,
        items: vec![jacket],
        date: date(2024, 1, 10),
        status: PurchaseStatus::Completed,
    }]
}

/// The account behind the demo login.
pub fn demo_user(email: &str) -> UserProfile {
    UserProfile {
        id: "1".to_string(),
        email: email.to_string(),
        username: "ecouser".to_string(),
        first_name: Some("Eco".to_string()),
        last_name: Some("User".to_string()),
        phone: Some("+1234567890".to_string()),
        address: Some("123 Green Street, Eco City, EC 12345".to_string()),
        join_date: date(2024, 1, 15),
    }
}
