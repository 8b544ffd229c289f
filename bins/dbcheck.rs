use chrono::Utc;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Set};
use tracing::info;
use uuid::Uuid;

/// Connectivity probe: connect, migrate, write one user row, disconnect.
/// Meant to be run by hand against a freshly provisioned database.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let cfg = configs::AppConfig::load()?;
    cfg.validate_database()?;

    info!(event = "connect", "connecting to the database");
    let db = models::db::connect(&cfg.database.url).await?;
    migration::Migrator::up(&db, None).await?;

    // Timestamp suffix keeps repeated runs clear of the unique username index.
    let now = Utc::now();
    let user = models::user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(format!("probe{}", now.timestamp())),
        password: Set("probe-password".to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let inserted = user.insert(&db).await?;
    info!(event = "user_inserted", id = %inserted.id, username = %inserted.username, "probe user created");

    db.close().await?;
    info!(event = "disconnect", "database connection closed");
    Ok(())
}
