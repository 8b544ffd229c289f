use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Multipart, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use configs::AuthMode;
use service::auth::domain::{LoginInput, RegisterInput, UsersQuery};
use service::auth::errors::AuthError;
use service::auth::service::AuthService;
use service::auth::token::Claims;

use crate::errors::AuthApiError;

/// Multipart field name the upload endpoint accepts.
const UPLOAD_FIELD: &str = "myFile";

#[derive(Clone)]
pub struct AuthState {
    pub svc: Arc<AuthService>,
    pub upload_dir: PathBuf,
}

async fn register(
    State(state): State<AuthState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<Value>), AuthApiError> {
    state.svc.register(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "user registered successfully" }))))
}

async fn login(
    State(state): State<AuthState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<Value>, AuthApiError> {
    let token = state.svc.login(input).await?;
    Ok(Json(json!({ "message": "login successful", "token": token })))
}

/// Bearer guard shared by the protected routes: missing token is a 401,
/// a token that fails verification is a 403. Valid claims are attached to the
/// request for downstream handlers.
pub async fn require_bearer_token(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_owned);
    let Some(token) = token else {
        return Err(AuthApiError(AuthError::MissingToken));
    };

    let claims = state.svc.verify(&token).map_err(AuthApiError)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

async fn protected(Extension(claims): Extension<Claims>) -> Json<Value> {
    Json(json!({
        "message": format!("Welcome, {}!", claims.username),
        "userId": claims.id,
        "userRole": "your role here"
    }))
}

async fn list_users(
    State(state): State<AuthState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Value>, AuthApiError> {
    let page = state.svc.list_users(&query).await?;
    Ok(Json(json!({
        "message": "paginated user list",
        "users": page.users,
        "pagination": page.pagination
    })))
}

async fn upload(
    State(state): State<AuthState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AuthApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AuthApiError(AuthError::Validation(e.to_string())))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let original = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AuthApiError(AuthError::Validation(e.to_string())))?;

        let ext = std::path::Path::new(&original)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let filename = format!("{UPLOAD_FIELD}-{}{ext}", Utc::now().timestamp_millis());
        let dest = state.upload_dir.join(&filename);
        tokio::fs::write(&dest, &data)
            .await
            .map_err(|e| AuthApiError(AuthError::Repository(e.to_string())))?;

        return Ok(Json(json!({
            "message": "file uploaded successfully",
            "filename": filename,
            "path": format!("/uploads/{filename}")
        })));
    }
    Err(AuthApiError(AuthError::Validation("no file was uploaded".into())))
}

/// One router for both operating modes; registration, the user listing, the
/// upload endpoint and the static uploads directory exist only when a store
/// backs the service.
pub fn build_router(state: AuthState, mode: AuthMode) -> Router {
    let mut guarded = Router::new().route("/protected", get(protected));
    if mode == AuthMode::Database {
        guarded = guarded
            .route("/users", get(list_users))
            .route("/upload", post(upload));
    }
    let guarded = guarded.route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_bearer_token,
    ));

    let mut open = Router::new()
        .route("/login", post(login))
        .route("/health", get(super::health));
    if mode == AuthMode::Database {
        open = open
            .route("/register", post(register))
            .nest_service("/uploads", ServeDir::new(&state.upload_dir));
    }

    open.merge(guarded)
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(super::trace_layer())
}
