//! # EcoFinds Entry Point
//!
//! Headless driver for the marketplace stores.
//!
//! ```text
//! ecofinds-app [path/to/marketplace.toml]
//! ```
//!
//! Without an argument the config comes from the platform config
//! directory, falling back to defaults.

use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    ecofinds_app::run(config_path).await
}
