//! Seed data script - populates the database with the sample catalogue
//!
//! Run with: cargo run --bin seed-data -- --database-url sqlite://shop.db?mode=rwc
//!
//! This creates:
//! - 5 categories (smartphones, laptops, accessories, gaming, home appliances)
//! - 10 items spread across them

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use shop_inventory::{
    config, db,
    seed::seed,
    services::{CategoryService, ItemService},
};

#[derive(Debug, Parser)]
#[command(name = "seed-data", about = "Populate the shop database with sample data")]
struct Args {
    /// Database to seed; defaults to the configured database_url
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut cfg = config::load_config().context("failed to load configuration")?;
    if let Some(url) = args.database_url {
        cfg.database_url = url;
    }
    config::init_tracing(cfg.log_level(), cfg.log_json);

    info!("=== Shop Inventory Seed Data ===");
    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to database")?;
    db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let pool = Arc::new(pool);
    let summary = seed(
        &CategoryService::new(pool.clone()),
        &ItemService::new(pool.clone()),
    )
    .await
    .context("failed to seed database")?;
    info!(
        "Created {} categories and {} items",
        summary.categories.len(),
        summary.items.len()
    );

    match Arc::try_unwrap(pool) {
        Ok(pool) => db::close_pool(pool).await?,
        Err(_) => info!("Connection pool still shared; dropping without explicit close"),
    }
    info!("=== Seed Data Complete ===");
    Ok(())
}
