//! Echoledger Engine - Main entry point.
//!
//! Opens the configured store, applies the schema and reports what it holds.

use echoledger_domain::{NpcFilter, Page, SettlementFilter};
use echoledger_engine::infrastructure::config::StoreConfig;
use echoledger_engine::App;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echoledger_engine=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Echoledger Engine");

    let config = StoreConfig::from_env();
    let app = App::connect(&config).await?;

    let listing = app
        .use_cases
        .settlement
        .records
        .list(&SettlementFilter::default(), Page::new(0, 1))
        .await?;
    let npcs = app
        .use_cases
        .npc
        .records
        .list(&NpcFilter::default().alive(true), Page::default())
        .await?;

    tracing::info!(
        url = %config.database_url,
        settlements = listing.total,
        living_npcs_sampled = npcs.len(),
        "Store ready"
    );
    Ok(())
}
