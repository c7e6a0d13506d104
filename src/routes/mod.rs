// Route exports
pub mod predictions;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};

use crate::models::ErrorResponse;

pub use predictions::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(predictions::configure);
}

/// JSON error raised by the extractor error handlers
#[derive(Debug)]
pub struct JsonError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.body.error, self.body.detail)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        status: StatusCode::BAD_REQUEST,
        body: ErrorResponse::new("Invalid JSON", err.to_string()),
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    JsonError {
        status: StatusCode::BAD_REQUEST,
        body: ErrorResponse::new("Invalid query", err.to_string()),
    }
    .into()
}

/// Extractor configuration shared by the server and tests
///
/// Bodies are parsed as JSON whatever their declared content type.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(handle_json_payload_error)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(handle_query_payload_error)
}
