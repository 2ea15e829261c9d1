//! End-to-end flows across the catalog, cart and session stores.

use ecofinds_core::{
    Category, CategoryFilter, Money, NewProduct, ProductStatus, ProductUpdate, ValidationError,
    MAX_PRICE_CENTS,
};
use ecofinds_store::{Marketplace, MarketplaceConfig, StoreError};

fn instant_config() -> MarketplaceConfig {
    MarketplaceConfig {
        auth_latency_ms: 0,
        ..Default::default()
    }
}

fn lamp(seller_id: &str, seller_name: &str) -> NewProduct {
    NewProduct {
        title: "Lamp".to_string(),
        description: "Desk lamp".to_string(),
        price: Money::parse("19.99").unwrap(),
        category: Category::Home,
        image: "https://images.pexels.com/photos/441797/pexels-photo-441797.jpeg".to_string(),
        seller_id: seller_id.to_string(),
        seller_name: seller_name.to_string(),
        status: ProductStatus::Available,
    }
}

#[tokio::test]
async fn lamp_listing_to_purchase() {
    let market = Marketplace::init(&instant_config());
    let user = market
        .session
        .login("demo@ecofinds.com", "password")
        .await
        .unwrap();

    let product = market
        .catalog
        .create(lamp(&user.id, &user.username))
        .unwrap();
    assert_eq!(market.catalog.my_listings(&user.id), vec![product.clone()]);

    market.cart.add_to_cart(&product).unwrap();
    market.cart.add_to_cart(&product).unwrap();

    let items = market.cart.cart_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, product.id);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(market.cart.total_price(), Ok(Money::parse("39.98").unwrap()));

    let purchase = market.cart.checkout().unwrap().unwrap();

    let purchases = market.cart.purchases();
    assert_eq!(purchases[0], purchase);
    assert_eq!(purchases[0].total.to_string(), "$39.98");
    assert!(market.cart.cart_items().is_empty());
    assert_eq!(market.cart.total_price(), Ok(Money::zero()));
}

#[test]
fn search_is_a_subset_of_available_listings() {
    let market = Marketplace::init(&instant_config());
    market
        .catalog
        .update(
            "4",
            ProductUpdate {
                status: Some(ProductStatus::Pending),
                ..Default::default()
            },
        )
        .unwrap();

    let available: Vec<_> = market
        .catalog
        .list()
        .into_iter()
        .filter(|p| p.is_available())
        .collect();
    assert_eq!(market.catalog.search("", CategoryFilter::All), available);

    for query in ["", "great", "GUITAR", "leather", "zzz"] {
        for filter in std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
        {
            for hit in market.catalog.search(query, filter) {
                assert!(available.contains(&hit), "{query:?}/{filter:?} leaked {}", hit.id);
                assert!(filter.matches(hit.category));
            }
        }
    }
}

#[test]
fn total_tracks_every_cart_mutation() {
    let market = Marketplace::init(&instant_config());
    let products = market.catalog.list();

    let check = || {
        let expected: i64 = market
            .cart
            .cart_items()
            .iter()
            .map(|i| i.price.cents() * i.quantity)
            .sum();
        assert_eq!(market.cart.total_price(), Ok(Money::from_cents(expected)));
    };

    for product in &products {
        market.cart.add_to_cart(product).unwrap();
        check();
    }
    market.cart.add_to_cart(&products[0]).unwrap();
    check();
    market.cart.update_quantity(&products[1].id, 4).unwrap();
    check();
    market.cart.update_quantity(&products[2].id, 0).unwrap();
    check();
    market.cart.remove_from_cart(&products[3].id).unwrap();
    check();
    assert_eq!(market.cart.total_items(), 2 + 4 + 1);

    market.cart.clear_cart();
    check();
    assert_eq!(market.cart.purchases().len(), 1);
}

#[test]
fn deleted_listing_stays_in_cart_and_checks_out() {
    let market = Marketplace::init(&instant_config());
    let guitar = market.catalog.get_by_id("5").unwrap();

    market.cart.add_to_cart(&guitar).unwrap();
    market.catalog.delete("5").unwrap();

    assert!(market.catalog.get_by_id("5").is_none());
    assert_eq!(market.cart.cart_items()[0].title, "Guitar Acoustic");

    let purchase = market.cart.checkout().unwrap().unwrap();
    assert_eq!(purchase.total, Money::from_major_minor(250, 0));
}

#[test]
fn checkout_on_empty_cart_leaves_ledger_alone() {
    let market = Marketplace::init(&instant_config());
    let before = market.cart.purchases();

    assert_eq!(market.cart.checkout(), Ok(None));

    assert_eq!(market.cart.purchases(), before);
}

#[tokio::test]
async fn unknown_login_stays_logged_out() {
    let market = Marketplace::init(&instant_config());

    assert_eq!(
        market.session.login("unknown@x.com", "anything").await,
        Err(StoreError::AuthFailed)
    );
    assert!(market.session.user().is_none());
    assert!(!market.session.is_loading());
}

#[tokio::test]
async fn session_observers_follow_login_and_logout() {
    let market = Marketplace::init(&instant_config());
    let mut rx = market.session.subscribe();

    market
        .session
        .login("demo@ecofinds.com", "pw")
        .await
        .unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(
        rx.borrow_and_update().user.as_ref().map(|u| u.username.as_str()),
        Some("ecouser")
    );

    market.session.logout();
    assert!(rx.borrow_and_update().user.is_none());
}

#[test]
fn absurd_price_never_reaches_the_cart() {
    let market = Marketplace::init(&instant_config());

    let mut listing = lamp("1", "ecouser");
    listing.price = Money::parse("92233720368547758.07").unwrap();
    assert!(matches!(
        market.catalog.create(listing),
        Err(StoreError::Validation(ValidationError::OutOfRange { .. }))
    ));

    let mut listing = lamp("1", "ecouser");
    listing.price = Money::from_cents(MAX_PRICE_CENTS);
    let priciest = market.catalog.create(listing).unwrap();

    market.cart.add_to_cart(&priciest).unwrap();
    market.cart.add_to_cart(&priciest).unwrap();
    assert_eq!(
        market.cart.total_price(),
        Ok(Money::from_cents(2 * MAX_PRICE_CENTS))
    );
}
