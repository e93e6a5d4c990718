use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User entity, one row per Google account.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub google_id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Data for inserting or refreshing a user from an identity provider profile.
#[derive(Debug, Clone)]
pub struct UserForUpsert {
    pub google_id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl UserForUpsert {
    /// Create a new `UserForUpsert` instance.
    pub fn new(google_id: String, email: String) -> Self {
        Self {
            google_id,
            email,
            name: None,
            picture: None,
        }
    }

    /// Set the display name.
    pub fn name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Set the avatar URL.
    pub fn picture(mut self, picture: Option<String>) -> Self {
        self.picture = picture;
        self
    }
}

/// Course entity.
#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data structure for creating a new course.
#[derive(Debug, Clone)]
pub struct CourseForCreate {
    pub title: String,
    pub code: Option<String>,
    pub description: Option<String>,
}

/// Data structure for updating an existing course.
///
/// All fields are optional - only provided fields will be updated.
/// `code` and `description` are nullable: `Some(None)` clears the column.
#[derive(Debug, Clone, Default)]
pub struct CourseForUpdate {
    pub title: Option<String>,
    pub code: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

impl CourseForUpdate {
    /// Create a new empty `CourseForUpdate` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the course code, or clear it with `None`.
    pub fn code(mut self, code: Option<String>) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the description, or clear it with `None`.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.code.is_none() && self.description.is_none()
    }
}
