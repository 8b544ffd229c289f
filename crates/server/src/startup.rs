use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use migration::MigratorTrait;
use tracing::info;

use configs::{AppConfig, AuthMode};
use service::auth::memory::MemoryUserRepository;
use service::auth::seaorm::SeaOrmUserRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::books::seaorm::SeaOrmBookRepository;
use service::books::service::BookService;
use service::notes::seaorm::SeaOrmNoteRepository;
use service::notes::service::NoteService;

use crate::routes;

/// Connect to the store and bring the schema up to date. Failure here is
/// fatal: the caller exits rather than serving degraded traffic.
async fn connect_store(cfg: &AppConfig) -> anyhow::Result<sea_orm::DatabaseConnection> {
    cfg.validate_database()?;
    let db = models::db::connect(&cfg.database.url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn serve(app: Router, cfg: &AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

/// Public entry: book catalog service.
pub async fn run_books() -> anyhow::Result<()> {
    let cfg = AppConfig::load()?;
    let db = connect_store(&cfg).await?;
    let svc = Arc::new(BookService::new(Arc::new(SeaOrmBookRepository { db })));
    let app = routes::books::build_router(routes::books::BooksState { svc });
    serve(app, &cfg).await
}

/// Public entry: notes service.
pub async fn run_notes() -> anyhow::Result<()> {
    let cfg = AppConfig::load()?;
    let db = connect_store(&cfg).await?;
    let svc = Arc::new(NoteService::new(Arc::new(SeaOrmNoteRepository { db })));
    let app = routes::notes::build_router(routes::notes::NotesState { svc });
    serve(app, &cfg).await
}

/// Public entry: authentication service, mode chosen by configuration.
pub async fn run_auth() -> anyhow::Result<()> {
    let cfg = AppConfig::load()?;
    cfg.validate_auth()?;

    let svc = match cfg.auth.mode {
        AuthMode::Memory => {
            info!(users = cfg.auth.users.len(), "auth starting in memory mode");
            let repo = MemoryUserRepository::new(
                cfg.auth.users.iter().map(|u| (u.username.clone(), u.password.clone())),
            );
            AuthService::new(
                Arc::new(repo),
                AuthConfig {
                    jwt_secret: cfg.auth.jwt_secret.clone(),
                    token_ttl: chrono::Duration::hours(1),
                },
            )
        }
        AuthMode::Database => {
            let db = connect_store(&cfg).await?;
            common::env::ensure_upload_dir(&cfg.auth.upload_dir).await?;
            AuthService::new(
                Arc::new(SeaOrmUserRepository { db }),
                AuthConfig {
                    jwt_secret: cfg.auth.jwt_secret.clone(),
                    token_ttl: chrono::Duration::hours(3),
                },
            )
        }
    };

    let state = routes::auth::AuthState {
        svc: Arc::new(svc),
        upload_dir: PathBuf::from(&cfg.auth.upload_dir),
    };
    let app = routes::auth::build_router(state, cfg.auth.mode);
    serve(app, &cfg).await
}
