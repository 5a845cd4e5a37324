//! Bookshelf catalog service - web server entry point
//!
//! Serves the in-memory book list seeded from `catalog.source_path` at startup.
//! The list lives exactly as long as the process and is cleared on shutdown.

use anyhow::Context;
use bookshelf::{api::create_catalog_router, config::Config, logging, state::CatalogState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _logging_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.logging.deployment_environment,
        "Starting bookshelf catalog service"
    );

    let addr = config
        .socket_addr()
        .context("Failed to determine socket address")?;

    let state = CatalogState::new(config);
    let catalog = state.catalog.clone();

    tracing::info!(
        books = catalog.count(),
        lifecycle = ?catalog.lifecycle(),
        listen_addr = %addr,
        "Catalog ready"
    );

    let app = create_catalog_router(state);

    tracing::info!("Bookshelf catalog listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(bookshelf::shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server terminated unexpectedly");
    }

    let dropped = catalog.clear();
    tracing::info!(dropped, "Catalog cleared, shutdown complete");

    Ok(())
}
