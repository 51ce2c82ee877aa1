//! Database connection pool and migrations.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::settings::Database;

/// Open a connection pool for the configured database.
pub async fn connect(settings: &Database) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        "Connecting to database (max {} connections)",
        settings.max_connections
    );

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.url)
        .await
}

/// Apply the embedded migrations in `packages/api/migrations`.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
