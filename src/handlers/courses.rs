use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};
use tracing::info;

use crate::db::models::{Course, CourseDetail};
use crate::error::ApiError;
use crate::middleware::auth::CurrentAccount;
use crate::middleware::request::{COURSE_NOT_FOUND, CourseId, JsonBody};
use crate::router::AppState;
use crate::service::authorization::{AuthorizationPolicy, Mutation};
use crate::types::requests::CourseInput;

/// GET /api/courses
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<CourseDetail>>, ApiError> {
    Ok(Json(state.courses.list_with_owner().await?))
}

/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    CourseId(id): CourseId,
) -> Result<Json<CourseDetail>, ApiError> {
    state
        .courses
        .find_with_owner(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(COURSE_NOT_FOUND.to_string()))
}

/// POST /api/courses -> the caller becomes the owner.
pub async fn create_course(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    body: JsonBody,
) -> Result<impl IntoResponse, ApiError> {
    let content = body.decode::<CourseInput>()?.validate()?;
    let id = state.courses.create(account.id, &content).await?;
    info!(id, owner = account.id, "course created");
    Ok((StatusCode::CREATED, [(LOCATION, format!("/api/courses/{id}"))]))
}

/// PUT /api/courses/{id} -> owner only.
pub async fn update_course(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    CourseId(id): CourseId,
    body: JsonBody,
) -> Result<StatusCode, ApiError> {
    let course = load_course(&state, id).await?;
    AuthorizationPolicy::ensure(&course, account.id, Mutation::Update)?;

    let content = body.decode::<CourseInput>()?.validate()?;
    state.courses.update(course.id, &content).await?;
    info!(id, owner = account.id, "course updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/courses/{id} -> owner only.
pub async fn delete_course(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    CourseId(id): CourseId,
) -> Result<StatusCode, ApiError> {
    let course = load_course(&state, id).await?;
    AuthorizationPolicy::ensure(&course, account.id, Mutation::Delete)?;

    state.courses.delete(course.id).await?;
    info!(id, owner = account.id, "course deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn load_course(state: &AppState, id: i64) -> Result<Course, ApiError> {
    state
        .courses
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(COURSE_NOT_FOUND.to_string()))
}
