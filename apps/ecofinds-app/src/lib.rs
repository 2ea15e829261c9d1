//! # EcoFinds App Library
//!
//! Command boundary between the mobile front-end and the marketplace
//! stores, plus the startup wiring.
//!
//! ## Module Organization
//! ```text
//! ecofinds_app/
//! ├── lib.rs          ◄─── You are here (startup & demo run)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Browse/search/listing commands
//! │   ├── cart.rs     ◄─── Cart and checkout commands
//! │   └── session.rs  ◄─── Login/register/profile commands
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: info, debug for ecofinds crates; RUST_LOG overrides     │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • marketplace.toml (explicit path or platform config dir)           │
//! │     • ECOFINDS_* environment overrides                                  │
//! │                                                                         │
//! │  3. Build the Stores ─────────────────────────────────────────────────► │
//! │     • Marketplace::init: catalog, cart, session (+ demo seed)           │
//! │                                                                         │
//! │  4. Drive the Commands ───────────────────────────────────────────────► │
//! │     • Headless walkthrough of the main screens                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;

use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::product::CreateListingRequest;
use commands::session::LoginRequest;
use commands::{cart, product, session};
use ecofinds_store::{Marketplace, MarketplaceConfig};

/// Runs a headless session against freshly initialized stores.
///
/// Signs in with the demo account, lists a lamp, buys two of them and
/// prints each command response as JSON on stdout.
pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    init_tracing();

    info!("Starting EcoFinds");

    let config = MarketplaceConfig::load_or_default(config_path);
    let market = Marketplace::init(&config);

    let user = session::login(
        &market.session,
        LoginRequest {
            email: config.demo_account_email.clone(),
            password: "demo".to_string(),
        },
    )
    .await?;
    print_json("session", &user)?;

    let listing = product::create_listing(
        &market.session,
        &market.catalog,
        market.config(),
        CreateListingRequest {
            title: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            price: "19.99".to_string(),
            category: "Home".to_string(),
            image: None,
        },
    )?;
    print_json("listing", &listing)?;

    let home = product::search_products(&market.catalog, "lamp", Some("Home"))?;
    print_json("search", &home)?;

    cart::add_to_cart(&market.catalog, &market.cart, &listing.id)?;
    let basket = cart::add_to_cart(&market.catalog, &market.cart, &listing.id)?;
    print_json("cart", &basket)?;

    let purchase = cart::checkout(&market.cart)?;
    info!(total = %purchase.total, "Demo order placed");
    print_json("purchases", &cart::list_purchases(&market.cart))?;

    print_json(
        "my_listings",
        &product::my_listings(&market.session, &market.catalog),
    )?;

    session::logout(&market.session);
    info!("Demo finished");
    Ok(())
}

fn print_json<T: Serialize>(label: &str, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing {} response", label))?;
    println!("── {} ──\n{}", label, json);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ecofinds_store=trace` - Show trace for the stores only
/// - Default: info, debug for ecofinds crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ecofinds=debug"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
