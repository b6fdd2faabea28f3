pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::Repositories;

use tracing::info;
use sea_orm::{Database, DatabaseConnection};

/// URL selecting the in-memory stores instead of a database.
pub const MEMORY_URL: &str = "memory://";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./vacations.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./vacations.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_URL
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    info!("Database connected successfully");
    Ok(db)
}
