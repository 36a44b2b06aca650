//! Database connection pool using the OnceCell pattern.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::settings::DatabaseSettings;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Get or initialize the database connection pool.
/// Settings are only read by the first caller.
pub async fn get_pool(settings: &DatabaseSettings) -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        tracing::info!(
            "Connecting to database (max {} connections)",
            settings.max_connections
        );
        PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.url)
            .await
    })
    .await
}
