//! # Schema Registry
//!
//! Every table the application owns, declared once as idempotent DDL.
//!
//! [`create_all`] walks the registry and creates whatever is missing. It is run
//! at startup and by the `POST /setup_db` administrative endpoint; running it
//! against an up-to-date database is a no-op.

use super::DbPool;
use tracing::debug;

/// A declared table.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub name: &'static str,
    pub ddl: &'static str,
}

/// Tables in dependency order (referenced tables first).
pub const TABLES: &[Table] = &[
    Table {
        name: "users",
        ddl: r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                google_id TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL,
                name TEXT,
                picture TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                last_login TIMESTAMP
            )
        "#,
    },
    Table {
        name: "courses",
        ddl: r#"
            CREATE TABLE IF NOT EXISTS courses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                code TEXT,
                description TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
        "#,
    },
];

/// Secondary indexes, created after all tables.
pub const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_courses_owner_id ON courses(owner_id)",
];

/// Create every declared table and index that does not exist yet.
///
/// Runs in a single transaction. The first failing statement aborts the
/// whole setup and its error is returned unchanged.
pub async fn create_all(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for table in TABLES {
        debug!("Creating table if missing: {}", table.name);
        sqlx::query(table.ddl).execute(&mut *tx).await?;
    }

    for index in INDEXES {
        sqlx::query(index).execute(&mut *tx).await?;
    }

    tx.commit().await?;
    Ok(())
}
