//! # Course Handlers
//!
//! CRUD over the signed-in user's courses. Every route sits behind
//! `require_auth`, so handlers receive the owner as [`CurrentUser`].
//!
//! A course id that exists but belongs to another user answers `404`, the
//! same as one that does not exist.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, State,
    },
    http::StatusCode,
    Json,
};
use lib_core::dto::{CourseListResponse, CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use lib_core::model::store::CourseRepository;
use lib_core::{AppError, DbPool, Result};
use tracing::{debug, info, instrument};

use crate::middleware::CurrentUser;

const COURSE_NOT_FOUND: &str = "Course not found";

fn course_not_found() -> AppError {
    AppError::NotFound(COURSE_NOT_FOUND.to_string())
}

/// Malformed JSON answers in the same `{"detail": ...}` shape as validation.
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

/// A malformed `{id}` answers 400 in the `{"detail": ...}` shape too.
fn course_id(path: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    path
        .map(|Path(id)| id)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

/// `GET /course`
pub async fn list_courses(
    State(pool): State<DbPool>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<CourseListResponse>> {
    let courses = CourseRepository::list_for_owner(&pool, user.id).await?;
    debug!("[COURSE] {} courses for user {}", courses.len(), user.id);

    Ok(Json(CourseListResponse {
        courses: courses.into_iter().map(CourseResponse::from).collect(),
    }))
}

/// `POST /course`
#[instrument(skip_all)]
pub async fn create_course(
    State(pool): State<DbPool>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: std::result::Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CourseResponse>)> {
    let course = json_body(payload)?
        .validate()
        .map_err(AppError::InvalidInput)?;

    let course = CourseRepository::create(&pool, user.id, course).await?;
    info!("[COURSE] Created course {} for user {}", course.id, user.id);

    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

/// `GET /course/{id}`
pub async fn get_course(
    State(pool): State<DbPool>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<CourseResponse>> {
    let id = course_id(id)?;
    let course = CourseRepository::find_for_owner(&pool, user.id, id)
        .await?
        .ok_or_else(course_not_found)?;

    Ok(Json(CourseResponse::from(course)))
}

/// `PUT /course/{id}`
///
/// Only the fields present in the body change; `null` clears `code` or
/// `description`.
#[instrument(skip_all)]
pub async fn update_course(
    State(pool): State<DbPool>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<CourseResponse>> {
    let id = course_id(id)?;
    let update = json_body(payload)?
        .validate()
        .map_err(AppError::InvalidInput)?;

    if update.is_empty() {
        return Err(AppError::InvalidInput("No fields to update".to_string()));
    }

    let course = CourseRepository::update(&pool, user.id, id, update)
        .await?
        .ok_or_else(course_not_found)?;
    info!("[COURSE] Updated course {} for user {}", course.id, user.id);

    Ok(Json(CourseResponse::from(course)))
}

/// `DELETE /course/{id}`
pub async fn delete_course(
    State(pool): State<DbPool>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let id = course_id(id)?;
    if !CourseRepository::delete(&pool, user.id, id).await? {
        return Err(course_not_found());
    }

    info!("[COURSE] Deleted course {} for user {}", id, user.id);
    Ok(StatusCode::NO_CONTENT)
}
