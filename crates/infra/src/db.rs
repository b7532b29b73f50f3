//! Database adapters: connection pool and schema migrations.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use feedback_domain::RepositoryError;

/// Open a Postgres connection pool.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, RepositoryError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| RepositoryError::Connection(format!("failed to connect to postgres: {e}")))
}

/// Apply the migrations embedded from `crates/infra/migrations`.
pub async fn migrate(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RepositoryError::Query(format!("migration failed: {e}")))
}
