//! # Course Repository
//!
//! Database access for courses. Every query is scoped to an owner: a course
//! belonging to someone else is indistinguishable from a missing one.

use super::models::{Course, CourseForCreate, CourseForUpdate};
use super::DbPool;
use sqlx::query_as;

/// Course repository for database operations.
pub struct CourseRepository;

impl CourseRepository {
    /// List the courses of `owner_id`, newest first.
    pub async fn list_for_owner(pool: &DbPool, owner_id: i64) -> Result<Vec<Course>, sqlx::Error> {
        query_as::<_, Course>(
            "SELECT * FROM courses WHERE owner_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// Find one course of `owner_id`.
    pub async fn find_for_owner(
        pool: &DbPool,
        owner_id: i64,
        id: i64,
    ) -> Result<Option<Course>, sqlx::Error> {
        query_as::<_, Course>("SELECT * FROM courses WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a course owned by `owner_id`.
    pub async fn create(
        pool: &DbPool,
        owner_id: i64,
        course: CourseForCreate,
    ) -> Result<Course, sqlx::Error> {
        query_as::<_, Course>(
            r#"
            INSERT INTO courses (owner_id, title, code, description)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&course.title)
        .bind(&course.code)
        .bind(&course.description)
        .fetch_one(pool)
        .await
    }

    /// Apply a partial update. Absent fields keep their value; `code` and
    /// `description` set to `Some(None)` are cleared.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Course))` - The updated course
    /// * `Ok(None)` - No such course for this owner
    pub async fn update(
        pool: &DbPool,
        owner_id: i64,
        id: i64,
        course: CourseForUpdate,
    ) -> Result<Option<Course>, sqlx::Error> {
        query_as::<_, Course>(
            r#"
            UPDATE courses SET
                title = COALESCE(?, title),
                code = CASE WHEN ? THEN ? ELSE code END,
                description = CASE WHEN ? THEN ? ELSE description END,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ? AND owner_id = ?
            RETURNING *
            "#,
        )
        .bind(&course.title)
        .bind(course.code.is_some())
        .bind(course.code.flatten())
        .bind(course.description.is_some())
        .bind(course.description.flatten())
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a course. Returns `false` when nothing matched.
    pub async fn delete(pool: &DbPool, owner_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
