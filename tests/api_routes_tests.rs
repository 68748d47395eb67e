use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use base64::Engine;
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

use course_api::db::{self, QueryExecutor, SchemaBootstrapper, SeedData};
use course_api::router::{AppState, app_router};

struct TestApp {
    app: Router,
    executor: QueryExecutor,
    path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

async fn spawn_app(tag: &str) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "course-api-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", path.display());
    let pool = db::connect(&database_url).await.expect("failed to open db");
    let executor = QueryExecutor::new(pool);
    SchemaBootstrapper::new(executor.clone(), SeedData::bundled().expect("bundled seed"))
        .run()
        .await
        .expect("bootstrap failed");

    TestApp {
        app: app_router(AppState::new(executor.clone())),
        executor,
        path,
    }
}

fn basic(user: &str, pass: &str) -> String {
    let token = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{pass}"));
    format!("Basic {token}")
}

const JOE: (&str, &str) = ("joe@smith.com", "joepassword");
const SALLY: (&str, &str) = ("sally@jones.com", "sallypassword");

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<(&str, &str)>,
    body: Option<Value>,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user, pass)) = auth {
        builder = builder.header(header::AUTHORIZATION, basic(user, pass));
    }
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");

    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not json")
    };
    (status, headers, json)
}

fn course_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A course about things",
        "estimatedTime": "3 hours",
        "materialsNeeded": "None"
    })
}

#[tokio::test]
async fn welcome_and_unknown_routes() {
    let t = spawn_app("welcome").await;

    let (status, _, body) = send(&t.app, "GET", "/api", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the REST API project!");

    let (status, _, body) = send(&t.app, "GET", "/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Route Not Found" }));
}

#[tokio::test]
async fn every_auth_failure_looks_the_same() {
    let t = spawn_app("deny").await;
    let expected = json!({ "message": "Access Denied" });

    let (status, _, body) = send(&t.app, "GET", "/api/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, expected);

    let (status, _, body) =
        send(&t.app, "GET", "/api/users", Some((JOE.0, "wrong")), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, expected);

    let (status, _, body) =
        send(&t.app, "GET", "/api/users", Some(("ghost@x.com", "pw")), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, expected);

    let (status, _, body) = send(&t.app, "GET", "/api/users", Some(("JOE@smith.com", JOE.1)), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn current_user_never_exposes_password() {
    let t = spawn_app("me").await;
    let (status, _, body) = send(&t.app, "GET", "/api/users", Some(JOE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["emailAddress"], JOE.0);
    assert_eq!(body[0]["firstName"], "Joe");
    assert!(body[0].get("password").is_none());
}

#[tokio::test]
async fn create_account_then_authenticate() {
    let t = spawn_app("signup").await;
    let new_user = json!({
        "firstName": "Ed",
        "lastName": "Example",
        "emailAddress": "e@x.com",
        "password": "secret"
    });

    let (status, headers, _) = send(&t.app, "POST", "/api/users", None, Some(new_user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(headers[header::LOCATION], "/");

    let stored: Option<String> = t
        .executor
        .retrieve_value(
            "SELECT password FROM Users WHERE emailAddress = ?",
            &["e@x.com".into()],
        )
        .await
        .unwrap();
    assert_ne!(stored.as_deref(), Some("secret"));

    let (status, _, body) =
        send(&t.app, "GET", "/api/users", Some(("e@x.com", "secret")), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["lastName"], "Example");

    let (status, _, body) = send(&t.app, "POST", "/api/users", None, Some(new_user)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errors"], "This email is in use already");
}

#[tokio::test]
async fn create_account_reports_each_missing_field() {
    let t = spawn_app("signup-invalid").await;
    let (status, _, body) = send(
        &t.app,
        "POST",
        "/api/users",
        None,
        Some(json!({ "firstName": "Ed", "emailAddress": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    assert!(errors.contains(&json!("Please provide a value for \"emailAddress\"")));
}

#[tokio::test]
async fn courses_are_public_and_include_owner() {
    let t = spawn_app("list").await;

    let (status, _, body) = send(&t.app, "GET", "/api/courses", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 3);
    assert_eq!(courses[0]["owner"]["emailAddress"], JOE.0);
    assert!(courses[0]["owner"].get("password").is_none());

    let (status, _, body) = send(&t.app, "GET", "/api/courses/2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Learn How to Program");

    let (status, _, body) = send(&t.app, "GET", "/api/courses/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Cannot find course");
}

#[tokio::test]
async fn created_course_is_owned_by_caller() {
    let t = spawn_app("create").await;
    let mut body = course_body("Owned");
    body["userId"] = json!(2);

    let (status, headers, _) = send(&t.app, "POST", "/api/courses", Some(JOE), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let location = headers[header::LOCATION].to_str().unwrap().to_string();
    assert!(location.starts_with("/api/courses/"));

    let (status, _, course) = send(&t.app, "GET", &location, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(course["owner"]["emailAddress"], JOE.0);

    let (status, _, _) = send(&t.app, "POST", "/api/courses", None, Some(course_body("x"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) =
        send(&t.app, "POST", "/api/courses", Some(JOE), Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn only_owner_may_update() {
    let t = spawn_app("update").await;

    // Course 1 belongs to Joe.
    let (status, _, body) =
        send(&t.app, "PUT", "/api/courses/1", Some(SALLY), Some(course_body("Hijack"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You're not the owner so can't update this course!"
    );

    let (status, _, _) =
        send(&t.app, "PUT", "/api/courses/1", Some(SALLY), Some(json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) =
        send(&t.app, "PUT", "/api/courses/1", Some(JOE), Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) =
        send(&t.app, "PUT", "/api/courses/1", Some(JOE), Some(course_body("Renamed"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, _, course) = send(&t.app, "GET", "/api/courses/1", None, None).await;
    assert_eq!(course["title"], "Renamed");
    assert_eq!(course["owner"]["emailAddress"], JOE.0);

    let (status, _, _) =
        send(&t.app, "PUT", "/api/courses/999", Some(JOE), Some(course_body("x"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_owner_may_delete() {
    let t = spawn_app("delete").await;

    let (status, _, body) = send(&t.app, "DELETE", "/api/courses/2", Some(JOE), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You're not the owner so can't delete this course!"
    );

    let (status, _, _) = send(&t.app, "DELETE", "/api/courses/2", Some(SALLY), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&t.app, "DELETE", "/api/courses/2", Some(SALLY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&t.app, "DELETE", "/api/courses/3", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_owner_update_is_forbidden_whatever_the_body() {
    let t = spawn_app("update-any-body").await;

    let (status, _, body) = send(
        &t.app,
        "PUT",
        "/api/courses/1",
        Some(SALLY),
        Some(json!({ "title": 5, "description": "d" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You're not the owner so can't update this course!"
    );

    for raw in ["", "title=Hijack"] {
        let req = Request::builder()
            .method("PUT")
            .uri("/api/courses/1")
            .header(header::AUTHORIZATION, basic(SALLY.0, SALLY.1))
            .body(Body::from(raw))
            .expect("failed to build request");
        let resp = t.app.clone().oneshot(req).await.expect("request failed");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "body {raw:?}");
    }
}

#[tokio::test]
async fn malformed_input_gets_json_errors() {
    let t = spawn_app("malformed").await;

    let (status, _, body) = send(
        &t.app,
        "PUT",
        "/api/courses/1",
        Some(JOE),
        Some(json!({ "title": 5, "description": "d" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);

    let req = Request::builder()
        .method("PUT")
        .uri("/api/courses/1")
        .header(header::AUTHORIZATION, basic(JOE.0, JOE.1))
        .body(Body::empty())
        .expect("failed to build request");
    let resp = t.app.clone().oneshot(req).await.expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);

    let (status, _, body) = send(
        &t.app,
        "POST",
        "/api/users",
        None,
        Some(json!({ "firstName": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].is_array());

    for uri in ["/api/courses/abc", "/api/courses/1.5"] {
        let (status, _, body) = send(&t.app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["message"], "Cannot find course");
    }

    let (status, _, _) = send(&t.app, "DELETE", "/api/courses/abc", Some(JOE), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&t.app, "DELETE", "/api/courses/abc", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
