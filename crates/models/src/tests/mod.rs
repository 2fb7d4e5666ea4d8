use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;



/// Fresh in-memory database with the schema applied.
pub async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    crate::db::connect_and_migrate(&cfg).await
}
