use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::customer::CustomerError;

pub const GENERIC_FAILURE: &str = "Erro interno ao processar a requisicao";

/// JSON error body `{"error": title, "detail": detail}` with an explicit status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, title: title.into(), detail }
    }

    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("Cliente com ID {} nao encontrado", id)))
    }

    /// Request-shape failures are reported as 422, except a missing JSON content type.
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => rejection.status(),
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self::new(status, "Validation Error", Some(rejection.body_text()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.title, "detail": self.detail});
        (self.status, Json(body)).into_response()
    }
}

impl From<CustomerError> for JsonApiError {
    fn from(e: CustomerError) -> Self {
        match e {
            CustomerError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
            CustomerError::Conflict(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Conflict", Some(msg)),
            CustomerError::NotFound(id) => JsonApiError::not_found(id),
            CustomerError::Storage(ref msg) => {
                error!(code = e.code(), err = %msg, "customer storage failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", Some(GENERIC_FAILURE.into()))
            }
        }
    }
}
