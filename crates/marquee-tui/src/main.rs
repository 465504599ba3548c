mod action;
mod app;
mod app_state;
mod card;
mod component;
mod components;
mod detail;
mod focus;
mod search;
mod selection;
mod theme;
mod trending;
mod widgets;

use std::sync::Arc;

use marquee_proto::catalog::CatalogClient;
use marquee_proto::config::Config;
use marquee_proto::counter::AppwriteCounter;
use marquee_proto::favorites::FavoritesStore;
use marquee_proto::storage::FileSlotStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Load config ──────────────────────────────────────────────────────────
    let (config, config_error) = Config::load_or_default();

    let data_dir = config.paths.data_dir.clone();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("marquee.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG wins; otherwise debug for app code with HTTP internals quieted.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("marquee log: {}", log_path.display());
    tracing::info!("marquee starting…");

    if let Some(e) = config_error {
        tracing::warn!("failed to load config, using defaults: {:#}", e);
    }

    if config.catalog.api_token.is_empty() {
        tracing::warn!("catalog api token is empty; requests will be rejected");
    }
    if !config.counter.is_configured() {
        tracing::info!("counter service not configured; trending stays empty");
    }

    // ── Services ─────────────────────────────────────────────────────────────
    let mut favorites = FavoritesStore::new(FileSlotStore::new(&data_dir));
    favorites.load();

    let catalog = CatalogClient::from_config(&config.catalog);
    let counter = Arc::new(AppwriteCounter::new(config.counter.clone()));

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(&config, catalog, counter, favorites);
    app.run().await
}
