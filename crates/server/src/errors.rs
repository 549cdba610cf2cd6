use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::RepositoryError;
use tracing::error;
use utoipa::ToSchema;

/// JSON error body returned by every failing API call.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub detail: Option<String>,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail }
    }

    pub fn invalid_payload(err: serde_json::Error) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid Map Payload", Some(err.to_string()))
    }
}

impl From<RepositoryError> for JsonApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            RepositoryError::Store(msg) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Store Failure", Some(msg)),
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = self.error, detail = ?self.detail, "request failed");
        }
        let body = ErrorBody { error: self.error.to_string(), detail: self.detail };
        (self.status, Json(body)).into_response()
    }
}
