use std::sync::Arc;

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, ServiceInfo};
use service::customer::{repo::seaorm::SeaOrmCustomerRepository, CustomerRepository, CustomerService};

use crate::openapi::ApiDoc;

pub mod customers;

pub const SERVICE_MESSAGE: &str = "Sistema de Cadastro de Clientes - API Online";

/// Shared handler state; cloning only bumps the `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub customers: Arc<CustomerService<dyn CustomerRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customers: Arc::new(CustomerService::new(repo)) }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmCustomerRepository::new(db)))
    }
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Service info", body = crate::openapi::ServiceInfoDoc)))]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::new(SERVICE_MESSAGE, env!("CARGO_PKG_VERSION")))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: info/health, customer API and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    let api = Router::new()
        .route("/clientes", get(customers::list).post(customers::create))
        .route("/clientes/:id", get(customers::get));

    public
        .merge(api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request, carrying method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
