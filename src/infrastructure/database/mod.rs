pub mod bootstrap;
pub mod entities;
pub mod migrator;
pub mod repositories;

pub use bootstrap::seed_identity;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./tctravel.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./tctravel.db?mode=rwc".to_string(),
        }
    }
}

impl From<&crate::config::DatabaseSection> for DatabaseConfig {
    fn from(section: &crate::config::DatabaseSection) -> Self {
        Self {
            url: section.url.clone(),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply all pending migrations
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    info!("Running database migrations...");
    Migrator::up(db, None).await?;
    info!("Migrations completed");
    Ok(())
}

/// Private in-memory SQLite database with the full schema applied.
///
/// The pool is pinned to one connection because every SQLite `:memory:`
/// connection opens its own database.
pub async fn init_in_memory_database() -> Result<DatabaseConnection, sea_orm::DbErr> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opts).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

#[cfg(test)]
pub(crate) async fn test_database() -> DatabaseConnection {
    init_in_memory_database()
        .await
        .expect("in-memory database")
}
