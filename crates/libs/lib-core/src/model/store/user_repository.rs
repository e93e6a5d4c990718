//! # User Repository
//!
//! Provides database access layer for user-related operations.
//!
//! Users are never created directly: they appear the first time someone signs
//! in with Google and are refreshed on every later sign-in (see
//! [`UserRepository::upsert_google`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, UserRepository, models::UserForUpsert};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite::memory:").await?;
//!
//! let user = UserRepository::upsert_google(
//!     &pool,
//!     UserForUpsert::new("1098765".to_string(), "alice@example.com".to_string()),
//! ).await?;
//!
//! let found = UserRepository::find_by_google_id(&pool, "1098765").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForUpsert};
use super::DbPool;
use sqlx::query_as;

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by primary key.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by their Google account id (the `sub` claim).
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - This Google account never signed in
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_google_id(
        pool: &DbPool,
        google_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE google_id = ?")
            .bind(google_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a user for a first sign-in, or refresh the existing row.
    ///
    /// On conflict with an existing `google_id` the profile fields are
    /// overwritten and `last_login` / `updated_at` are bumped; `id` and
    /// `created_at` are kept.
    pub async fn upsert_google(pool: &DbPool, user: UserForUpsert) -> Result<User, sqlx::Error> {
        query_as::<_, User>(
            r#"
            INSERT INTO users (google_id, email, name, picture, last_login)
            VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(google_id) DO UPDATE SET
                email = excluded.email,
                name = excluded.name,
                picture = excluded.picture,
                last_login = CURRENT_TIMESTAMP,
                updated_at = CURRENT_TIMESTAMP
            RETURNING *
            "#,
        )
        .bind(&user.google_id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.picture)
        .fetch_one(pool)
        .await
    }
}
