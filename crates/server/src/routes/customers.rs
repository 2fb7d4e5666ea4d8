use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use service::customer::{CreateCustomerInput, Customer, CustomerError};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive fragment of the customer name
    pub nome: Option<String>,
}

/// Request shape for `POST /clientes`. Business rules (trimmed name, phone
/// format, unique email) are enforced again by the service.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 255))]
    pub nome: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub telefone: Option<String>,
}

impl From<CreateCustomerRequest> for CreateCustomerInput {
    fn from(r: CreateCustomerRequest) -> Self {
        CreateCustomerInput { name: r.nome, email: r.email, phone: r.telefone }
    }
}

#[utoipa::path(
    post, path = "/clientes", tag = "clientes",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Business rule violated or email already registered", body = crate::openapi::ErrorBody),
        (status = 422, description = "Malformed request", body = crate::openapi::ErrorBody),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), JsonApiError> {
    let Json(req) = payload.map_err(JsonApiError::from_rejection)?;
    req.validate()
        .map_err(|e| JsonApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(e.to_string())))?;

    let customer = state.customers.create(req.into()).await?;
    info!(id = customer.id, "created customer");
    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get, path = "/clientes", tag = "clientes",
    params(ListQuery),
    responses(
        (status = 200, description = "Customers ordered by name", body = [crate::openapi::CustomerDoc]),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<Customer>>, JsonApiError> {
    let customers = match q.nome.as_deref() {
        Some(nome) if !nome.is_empty() => state.customers.find_by_name(nome).await?,
        _ => state.customers.list_all().await?,
    };
    info!(count = customers.len(), "list customers");
    Ok(Json(customers))
}

#[utoipa::path(
    get, path = "/clientes/{id}", tag = "clientes",
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Non-positive id", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody),
        (status = 422, description = "Id is not an integer", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Customer>, JsonApiError> {
    let Path(id) = path.map_err(|e| JsonApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(e.body_text())))?;
    let customer = state.customers.find_by_id(id).await?.ok_or(CustomerError::NotFound(id))?;
    Ok(Json(customer))
}
