use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use stockroom_core::{NewProduct, Product, ProductId};
use stockroom_metadata::{MetadataError, ProductStore};

use crate::config::PostgresConfig;
use crate::migrations;

type ProductRow = (i64, String, String, DateTime<Utc>, DateTime<Utc>);

fn into_product((id, name, photo_key, created_at, updated_at): ProductRow) -> Product {
    Product {
        id,
        name,
        photo_key,
        created_at,
        updated_at,
    }
}

fn backend(e: sqlx::Error) -> MetadataError {
    MetadataError::Backend(e.to_string())
}

/// Build `PgConnectOptions` from a [`PostgresConfig`], applying the SSL mode
/// when configured.
fn build_connect_options(
    config: &PostgresConfig,
) -> Result<sqlx::postgres::PgConnectOptions, MetadataError> {
    let mut options: sqlx::postgres::PgConnectOptions = config
        .url
        .parse()
        .map_err(|e: sqlx::Error| MetadataError::Connection(e.to_string()))?;

    if let Some(ref mode) = config.ssl_mode {
        let ssl_mode = match mode.as_str() {
            "disable" => sqlx::postgres::PgSslMode::Disable,
            "prefer" => sqlx::postgres::PgSslMode::Prefer,
            "require" => sqlx::postgres::PgSslMode::Require,
            "verify-ca" => sqlx::postgres::PgSslMode::VerifyCa,
            "verify-full" => sqlx::postgres::PgSslMode::VerifyFull,
            other => {
                return Err(MetadataError::Connection(format!(
                    "unknown ssl_mode: {other}"
                )));
            }
        };
        options = options.ssl_mode(ssl_mode);
    }

    Ok(options)
}

/// Open a connection pool without touching the schema.
pub async fn connect_pool(config: &PostgresConfig) -> Result<PgPool, MetadataError> {
    let connect_options = build_connect_options(config)?;
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.pool_size)
        .connect_with(connect_options)
        .await
        .map_err(|e| MetadataError::Connection(e.to_string()))
}

/// PostgreSQL-backed implementation of [`ProductStore`].
///
/// Deletes are soft: the row gets a `deleted_at` timestamp and is hidden from
/// every read.
pub struct PostgresProductStore {
    pool: PgPool,
    config: Arc<PostgresConfig>,
}

impl std::fmt::Debug for PostgresProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresProductStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PostgresProductStore {
    /// Connect, create the pool, and make sure the products table exists.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Connection`] if the pool cannot be created, or
    /// [`MetadataError::Migration`] if the table bootstrap fails.
    pub async fn new(config: PostgresConfig) -> Result<Self, MetadataError> {
        let pool = connect_pool(&config).await?;
        Self::from_pool(pool, config).await
    }

    /// Create a store from an existing pool. Runs migrations on creation.
    pub async fn from_pool(pool: PgPool, config: PostgresConfig) -> Result<Self, MetadataError> {
        migrations::run_migrations(&pool, &config)
            .await
            .map_err(|e| MetadataError::Migration(e.to_string()))?;
        info!(table = %config.products_table(), "products table ready");

        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn insert(&self, product: NewProduct) -> Result<Product, MetadataError> {
        let table = self.config.products_table();
        let query = format!(
            "INSERT INTO {table} (name, photo_key) VALUES ($1, $2) \
             RETURNING id, name, photo_key, created_at, updated_at"
        );

        let row: ProductRow = sqlx::query_as(&query)
            .bind(&product.name)
            .bind(&product.photo_key)
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;

        debug!(id = row.0, "product row inserted");
        Ok(into_product(row))
    }

    async fn scan(&self, offset: u64, limit: u64) -> Result<Vec<Product>, MetadataError> {
        let table = self.config.products_table();
        let query = format!(
            "SELECT id, name, photo_key, created_at, updated_at FROM {table} \
             WHERE deleted_at IS NULL ORDER BY id LIMIT $1 OFFSET $2"
        );

        let rows: Vec<ProductRow> = sqlx::query_as(&query)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

        Ok(rows.into_iter().map(into_product).collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, MetadataError> {
        let table = self.config.products_table();
        let query = format!(
            "SELECT id, name, photo_key, created_at, updated_at FROM {table} \
             WHERE id = $1 AND deleted_at IS NULL"
        );

        let row: Option<ProductRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        Ok(row.map(into_product))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<bool, MetadataError> {
        let table = self.config.products_table();
        let query = format!(
            "UPDATE {table} SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL"
        );

        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("postgres pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_ssl_mode() {
        let config = PostgresConfig {
            ssl_mode: Some("sometimes".into()),
            ..PostgresConfig::default()
        };
        let err = build_connect_options(&config).unwrap_err();
        assert!(err.to_string().contains("unknown ssl_mode: sometimes"));
    }

    #[test]
    fn rejects_malformed_url() {
        let config = PostgresConfig {
            url: "not a url".into(),
            ..PostgresConfig::default()
        };
        assert!(matches!(
            build_connect_options(&config),
            Err(MetadataError::Connection(_))
        ));
    }
}
