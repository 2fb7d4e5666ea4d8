use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect the pool, make sure the schema exists and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_and_migrate(&cfg.database).await?;
    let state = ServerState::from_db(db);
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = AppConfig::load_or_env()?;
    let app = build_app(&cfg).await?;

    // Bind and serve
    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "starting customer registry");
    axum::serve(listener, app).await?;
    Ok(())
}
