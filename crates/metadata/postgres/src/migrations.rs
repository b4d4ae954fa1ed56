use sqlx::PgPool;

use crate::config::PostgresConfig;

/// Create the products table and its index if they do not exist.
///
/// Rows are soft-deleted: `deleted_at` is set instead of removing the row,
/// so ids are never reused.
///
/// # Errors
///
/// Returns a [`sqlx::Error`] if any DDL statement fails.
pub async fn run_migrations(pool: &PgPool, config: &PostgresConfig) -> Result<(), sqlx::Error> {
    let products_table = config.products_table();

    let create_products = format!(
        "CREATE TABLE IF NOT EXISTS {products_table} (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            photo_key TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMPTZ
        )"
    );

    let create_deleted_at_idx = format!(
        "CREATE INDEX IF NOT EXISTS {}_deleted_at_idx ON {products_table} (deleted_at)",
        config.table
    );

    sqlx::query(&create_products).execute(pool).await?;
    sqlx::query(&create_deleted_at_idx).execute(pool).await?;

    Ok(())
}
