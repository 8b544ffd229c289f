use sea_orm::{Database, DatabaseConnection};

/// Connect to the document store. Callers treat failure as fatal at startup.
pub async fn connect(url: &str) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(url).await?;
    tracing::info!("database connection established");
    Ok(db)
}
