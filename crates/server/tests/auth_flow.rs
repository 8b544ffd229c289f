use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Duration;
use serde_json::{json, Value};
use tower::Service;

use configs::AuthMode;
use server::routes::auth::{build_router, AuthState};
use service::auth::memory::MemoryUserRepository;
use service::auth::repository::mock::MockUserRepository;
use service::auth::service::{AuthConfig, AuthService};

const SECRET: &str = "integration-test-secret";

fn memory_app() -> Router {
    let repo = MemoryUserRepository::new(vec![(
        "admin".to_string(),
        "password123".to_string(),
    )]);
    let svc = AuthService::new(
        Arc::new(repo),
        AuthConfig { jwt_secret: SECRET.to_string(), token_ttl: Duration::hours(1) },
    );
    build_router(
        AuthState { svc: Arc::new(svc), upload_dir: std::env::temp_dir() },
        AuthMode::Memory,
    )
}

fn database_app(upload_dir: PathBuf) -> Router {
    let svc = AuthService::new(
        Arc::new(MockUserRepository::default()),
        AuthConfig { jwt_secret: SECRET.to_string(), token_ttl: Duration::hours(3) },
    );
    build_router(AuthState { svc: Arc::new(svc), upload_dir }, AuthMode::Database)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &mut Router, username: &str, password: &str) -> String {
    let resp = app
        .call(post_json("/login", &json!({ "username": username, "password": password })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn memory_login_grants_access_to_protected() -> anyhow::Result<()> {
    let mut app = memory_app();
    let token = login(&mut app, "admin", "password123").await;

    let resp = app.call(get_with_token("/protected", &token)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Welcome, admin!");
    assert_eq!(body["userRole"], "your role here");
    assert!(body["userId"].is_string());
    Ok(())
}

#[tokio::test]
async fn memory_rejects_bad_credentials_with_one_message() -> anyhow::Result<()> {
    let mut app = memory_app();

    let wrong_pass = app
        .call(post_json("/login", &json!({ "username": "admin", "password": "nope" })))
        .await?;
    assert_eq!(wrong_pass.status(), StatusCode::UNAUTHORIZED);
    let wrong_pass = body_json(wrong_pass).await;

    let unknown = app
        .call(post_json("/login", &json!({ "username": "ghost", "password": "nope" })))
        .await?;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong_pass["message"], unknown["message"]);
    Ok(())
}

#[tokio::test]
async fn missing_token_and_bad_token_differ() -> anyhow::Result<()> {
    let mut app = memory_app();

    let req = Request::builder().uri("/protected").body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["message"], "access denied: no token provided");

    let resp = app.call(get_with_token("/protected", "garbage.token.here")).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["message"], "invalid or expired token");
    Ok(())
}

#[tokio::test]
async fn memory_mode_does_not_expose_registration() -> anyhow::Result<()> {
    let mut app = memory_app();
    let resp = app
        .call(post_json("/register", &json!({ "username": "new", "password": "secret1" })))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn register_login_and_list_users() -> anyhow::Result<()> {
    let mut app = database_app(std::env::temp_dir());

    let resp = app
        .call(post_json("/register", &json!({ "username": "alice1", "password": "secret1" })))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .call(post_json("/register", &json!({ "username": "alice1", "password": "other12" })))
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app
        .call(post_json("/register", &json!({ "username": "bob", "password": "short" })))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"],
        "password must be at least 6 characters"
    );

    let token = login(&mut app, "alice1", "secret1").await;
    let resp = app.call(get_with_token("/users", &token)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["pagination"]["totalItems"], 1);
    assert_eq!(body["users"][0]["username"], "alice1");
    assert!(body["users"][0].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn user_listing_validates_its_query() -> anyhow::Result<()> {
    let mut app = database_app(std::env::temp_dir());
    let _ = app
        .call(post_json("/register", &json!({ "username": "carol", "password": "secret1" })))
        .await?;
    let token = login(&mut app, "carol", "secret1").await;

    let resp = app.call(get_with_token("/users?limit=0", &token)).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"],
        "limit must be an integer between 1 and 100"
    );

    let resp = app.call(get_with_token("/users?sortBy=password", &token)).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn users_endpoint_requires_a_token() -> anyhow::Result<()> {
    let mut app = database_app(std::env::temp_dir());
    let req = Request::builder().uri("/users").body(Body::empty())?;
    assert_eq!(app.call(req).await?.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

fn multipart_request(boundary: &str, field: &str, filename: &str, token: &str) -> Request<Body> {
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         file payload\r\n\
         --{boundary}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn upload_stores_the_file_under_a_timestamped_name() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("uploads-test-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await?;
    let mut app = database_app(dir.clone());

    let _ = app
        .call(post_json("/register", &json!({ "username": "dave", "password": "secret1" })))
        .await?;
    let token = login(&mut app, "dave", "secret1").await;

    let resp = app
        .call(multipart_request("testboundary42", "myFile", "hello.txt", &token))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let filename = body["filename"].as_str().unwrap();
    assert!(filename.starts_with("myFile-"));
    assert!(filename.ends_with(".txt"));
    assert_eq!(body["path"], format!("/uploads/{filename}"));
    assert!(dir.join(filename).exists());

    let resp = app
        .call(multipart_request("testboundary42", "wrongField", "hello.txt", &token))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "no file was uploaded");

    tokio::fs::remove_dir_all(&dir).await?;
    Ok(())
}
