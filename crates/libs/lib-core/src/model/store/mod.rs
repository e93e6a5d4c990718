//! # Database Store
//!
//! Database connection pool, schema registry, and repository implementations.

// region: --- Modules
pub mod models;
pub mod schema;
pub mod user_repository;
pub mod course_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use course_repository::CourseRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::path::Path;
use tracing::info;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool.
///
/// The database file, and its parent directory, are created when missing.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    if let Some(db_path) = database_url.strip_prefix("sqlite:") {
        let db_path = db_path.trim_start_matches("//");
        if !db_path.starts_with(':') {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                    info!("Created database directory: {:?}", parent);
                }
            }
        }
    }

    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}
// endregion: --- Types and Functions
