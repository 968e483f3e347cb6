//! Storage infrastructure - Postgres pool and schema migrations

pub mod migrations;
mod postgres;

pub use migrations::{item_migrations, run_item_migrations, Migration, Migrator, PostgresMigrator};
pub use postgres::{connect_pool, PostgresConfig};
