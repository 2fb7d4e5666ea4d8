#![cfg(test)]
use sea_orm::DatabaseConnection;
use configs::DatabaseConfig;
use models::db::connect_and_migrate;

/// Fresh in-memory SQLite database with migrations applied.
///
/// Every call gets its own database, so tests never see each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_and_migrate(&cfg).await?;
    Ok(db)
}
