//! Liveness probes

use actix_web::HttpResponse;
use parley_core::errors::DomainError;

use crate::handlers::ApiError;

/// Handler for GET /readiness
pub async fn readiness() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Handler for GET /err
///
/// Always fails, so clients and monitors can check how errors are rendered.
pub async fn error_probe() -> Result<HttpResponse, ApiError> {
    Err(DomainError::Internal {
        message: "error probe".to_string(),
    }
    .into())
}
