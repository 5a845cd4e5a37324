//! Document collection access

mod store;
mod traits;

pub use store::PostgresBookStore;
pub use traits::BookStore;

use crate::{config::DatabaseConfig, Error, Result};
use sqlx::{postgres::PgConnectOptions, PgPool};
use std::str::FromStr;

/// Create the connection pool for the configured database
pub async fn create_pool(config: &DatabaseConfig, url: &str) -> Result<PgPool> {
    tracing::info!(database = %config.name, "Creating database connection pool...");

    let options = PgConnectOptions::from_str(url)
        .map_err(Error::Database)?
        .database(&config.name);

    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(config.pool_min_size)
        .max_connections(config.pool_max_size)
        .acquire_timeout(std::time::Duration::from_secs(config.pool_timeout_seconds))
        .connect_with(options)
        .await
        .map_err(Error::Database)?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.pool_min_size,
        config.pool_max_size
    );

    Ok(pool)
}
