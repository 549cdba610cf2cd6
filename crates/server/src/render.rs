use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Renders response bodies as JSON. Constructed once at composition time and
/// carried in the router state.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormatter {
    indent: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self { Self { indent: true } }
}

impl JsonFormatter {
    pub fn new(indent: bool) -> Self { Self { indent } }

    pub fn compact() -> Self { Self { indent: false } }

    pub fn render<T: Serialize>(&self, status: StatusCode, value: &T) -> Response {
        let encoded = if self.indent { serde_json::to_vec_pretty(value) } else { serde_json::to_vec(value) };
        match encoded {
            Ok(body) => (
                status,
                [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
                body,
            )
                .into_response(),
            Err(e) => {
                error!(error = %e, "failed to encode response body");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
