//! Migrate command - applies the item store schema

use anyhow::Context;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::storage::{connect_pool, run_item_migrations, PostgresConfig};

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let database = &config.database;
    let url = database
        .url
        .as_deref()
        .context("database.url is required to run migrations")?;

    let pool = connect_pool(&PostgresConfig::from_database_config(url, database)).await?;
    run_item_migrations(&pool, database.embedding_dim).await?;
    pool.close().await;

    info!(dimension = database.embedding_dim, "Migrations complete");

    Ok(())
}
