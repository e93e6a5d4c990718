//! # Course Data Transfer Objects
//!
//! Request and response structures for the `/course` endpoints.
//!
//! - `GET /course` -> [`CourseListResponse`]
//! - `POST /course` - [`CreateCourseRequest`] -> [`CourseResponse`]
//! - `GET /course/{id}` -> [`CourseResponse`]
//! - `PUT /course/{id}` - [`UpdateCourseRequest`] -> [`CourseResponse`]

use crate::model::store::models::{Course, CourseForCreate, CourseForUpdate};
use lib_utils::{format_time, validate_max_length, validate_not_empty};
use serde::{Deserialize, Deserializer, Serialize};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_CODE_LEN: usize = 32;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Body of `POST /course`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub title: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateCourseRequest {
    /// Validate and normalize into a storable course. The title is trimmed.
    pub fn validate(self) -> Result<CourseForCreate, String> {
        let title = validate_title(&self.title)?;
        validate_optional(self.code.as_deref(), MAX_CODE_LEN, "Code")?;
        validate_optional(self.description.as_deref(), MAX_DESCRIPTION_LEN, "Description")?;

        Ok(CourseForCreate {
            title,
            code: self.code,
            description: self.description,
        })
    }
}

/// Body of `PUT /course/{id}`. Absent fields are left unchanged; an explicit
/// `null` clears `code` or `description`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub code: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

/// Tell a present `null` (`Some(None)`) apart from an absent field (`None`).
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateCourseRequest {
    /// Validate the fields that are present.
    pub fn validate(self) -> Result<CourseForUpdate, String> {
        let mut update = CourseForUpdate::new();

        if let Some(title) = self.title {
            update = update.title(validate_title(&title)?);
        }
        if let Some(code) = self.code {
            validate_optional(code.as_deref(), MAX_CODE_LEN, "Code")?;
            update = update.code(code);
        }
        if let Some(description) = self.description {
            validate_optional(description.as_deref(), MAX_DESCRIPTION_LEN, "Description")?;
            update = update.description(description);
        }

        Ok(update)
    }
}

fn validate_title(title: &str) -> Result<String, String> {
    validate_not_empty(title, "Title")?;
    let title = title.trim();
    validate_max_length(title, MAX_TITLE_LEN, "Title")?;
    Ok(title.to_string())
}

fn validate_optional(value: Option<&str>, max: usize, field_name: &str) -> Result<(), String> {
    match value {
        Some(value) => validate_max_length(value, max, field_name),
        None => Ok(()),
    }
}

/// Public view of a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            code: course.code,
            description: course.description,
            created_at: format_time(course.created_at),
            updated_at: format_time(course.updated_at),
        }
    }
}

/// Body of `GET /course`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
}
