use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::db::{AccountRepository, CourseRepository, QueryExecutor};
use crate::handlers::{accounts, courses};

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountRepository,
    pub courses: CourseRepository,
}

impl AppState {
    pub fn new(executor: QueryExecutor) -> Self {
        Self {
            accounts: AccountRepository::new(executor.clone()),
            courses: CourseRepository::new(executor),
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(welcome))
        .route(
            "/users",
            get(accounts::current_user).post(accounts::create_user),
        )
        .route(
            "/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/courses/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        );

    Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn welcome() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the REST API project!" }))
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route Not Found" })),
    )
}
