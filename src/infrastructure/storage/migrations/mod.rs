//! Database migrations infrastructure

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Executor;

use crate::domain::DomainError;

/// Trait for running database migrations
#[async_trait]
pub trait Migrator: Send + Sync {
    /// Runs all pending migrations
    async fn run(&self) -> Result<(), DomainError>;

    /// Returns the current migration version
    async fn version(&self) -> Result<Option<i64>, DomainError>;
}

/// PostgreSQL migrator over an ordered list of embedded migrations
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
    migrations: Vec<Migration>,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool, migrations: Vec<Migration>) -> Self {
        Self { pool, migrations }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                success BOOLEAN NOT NULL DEFAULT TRUE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::storage_unavailable(format!("Failed to create migrations table: {}", e))
        })?;

        Ok(())
    }

    /// Runs a single migration unless already applied
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        let applied: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)",
        )
        .bind(migration.version)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::storage_unavailable(format!("Failed to check migration status: {}", e))
        })?;

        if applied {
            return Ok(false);
        }

        // Plain-text execution so DO blocks and multi-statement bodies work
        (&self.pool)
            .execute(migration.up.as_str())
            .await
            .map_err(|e| {
                DomainError::storage_unavailable(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage_unavailable(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        tracing::info!(
            version = migration.version,
            description = %migration.description,
            "Applied migration"
        );

        Ok(true)
    }
}

#[async_trait]
impl Migrator for PostgresMigrator {
    async fn run(&self) -> Result<(), DomainError> {
        self.ensure_migrations_table().await?;

        for migration in &self.migrations {
            self.run_migration(migration).await?;
        }

        Ok(())
    }

    async fn version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        let version: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(version) FROM _migrations WHERE success = TRUE",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::storage_unavailable(format!("Failed to get migration version: {}", e))
        })?;

        Ok(version)
    }
}

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version
    pub version: i64,
    /// Human-readable description
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
}

impl Migration {
    pub fn new(version: i64, description: impl Into<String>, up: impl Into<String>) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
        }
    }
}

/// Schema for the item store with `dimensions`-long embeddings
pub fn item_migrations(dimensions: usize) -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Enable pgvector",
            "CREATE EXTENSION IF NOT EXISTS vector",
        ),
        Migration::new(
            2,
            "Create items table",
            format!(
                r#"
                CREATE TABLE IF NOT EXISTS items (
                    id UUID PRIMARY KEY,
                    content TEXT NOT NULL,
                    metadata JSONB,
                    embedding vector({}),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
                dimensions
            ),
        ),
        Migration::new(
            3,
            "Create items embedding index",
            r#"
            DO $$
            BEGIN
                CREATE INDEX IF NOT EXISTS idx_items_embedding_hnsw
                    ON items USING hnsw (embedding vector_cosine_ops);
            EXCEPTION WHEN OTHERS THEN
                CREATE INDEX IF NOT EXISTS idx_items_embedding_ivfflat
                    ON items USING ivfflat (embedding vector_cosine_ops) WITH (lists = 100);
            END
            $$
            "#,
        ),
        Migration::new(
            4,
            "Create items metadata index",
            "CREATE INDEX IF NOT EXISTS idx_items_metadata ON items USING gin (metadata jsonb_path_ops)",
        ),
    ]
}

/// Applies the item schema
pub async fn run_item_migrations(pool: &PgPool, dimensions: usize) -> Result<(), DomainError> {
    PostgresMigrator::new(pool.clone(), item_migrations(dimensions))
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creation() {
        let migration = Migration::new(1, "Test migration", "CREATE TABLE test");

        assert_eq!(migration.version, 1);
        assert_eq!(migration.description, "Test migration");
        assert_eq!(migration.up, "CREATE TABLE test");
    }

    #[test]
    fn test_item_migrations_order() {
        let migrations = item_migrations(384);

        for i in 1..migrations.len() {
            assert!(
                migrations[i].version > migrations[i - 1].version,
                "Migrations should be in ascending order"
            );
        }
    }

    #[test]
    fn test_item_table_uses_dimension() {
        let migrations = item_migrations(768);

        assert!(migrations[1].up.contains("vector(768)"));
        assert!(migrations[2].up.contains("hnsw"));
        assert!(migrations[2].up.contains("ivfflat"));
    }
}
