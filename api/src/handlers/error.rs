//! Mapping from domain errors to HTTP responses.
//!
//! Every failure is rendered as the shared [`ErrorResponse`] body. Internal
//! details are logged, never returned.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use parley_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use parley_shared::{error_codes, ErrorResponse};
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error type returned by every handler
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl ApiError {
    /// Stable, machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => error_codes::VALIDATION_ERROR,
            ApiError::Domain(error) => match error {
                DomainError::Token(TokenError::TokenGenerationFailed) => error_codes::INTERNAL_ERROR,
                DomainError::Token(_) => error_codes::UNAUTHORIZED,
                DomainError::Auth(AuthError::InvalidCredentials) => error_codes::INVALID_CREDENTIALS,
                DomainError::Auth(AuthError::WrongTokenKind { .. }) => error_codes::WRONG_TOKEN_KIND,
                DomainError::Auth(AuthError::EmailAlreadyInUse) => error_codes::CONFLICT,
                DomainError::Auth(AuthError::UserNotFound) | DomainError::NotFound { .. } => {
                    error_codes::NOT_FOUND
                }
                DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
                    error_codes::VALIDATION_ERROR
                }
                DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            },
        }
    }

    fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            error_codes::UNAUTHORIZED
            | error_codes::INVALID_CREDENTIALS
            | error_codes::WRONG_TOKEN_KIND => StatusCode::UNAUTHORIZED,
            error_codes::CONFLICT => StatusCode::CONFLICT,
            error_codes::NOT_FOUND => StatusCode::NOT_FOUND,
            error_codes::VALIDATION_ERROR | error_codes::BAD_REQUEST => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = if self.is_internal() {
            log::error!("Request failed: {}", self);
            ErrorResponse::new(self.code(), INTERNAL_MESSAGE)
        } else {
            let body = ErrorResponse::new(self.code(), self.to_string());
            match self {
                ApiError::Validation(errors) => body.add_detail("fields", errors),
                _ => body,
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Renders malformed JSON bodies as a 400 with the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        "Invalid request body",
    ));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::domain::TokenKind;

    fn status_and_code(error: impl Into<ApiError>) -> (StatusCode, &'static str) {
        let error = error.into();
        (error.status_code(), error.code())
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        for error in [
            TokenError::MissingToken,
            TokenError::InvalidTokenFormat,
            TokenError::InvalidSignature,
            TokenError::UnsupportedAlgorithm,
            TokenError::TokenExpired,
            TokenError::TokenNotYetValid,
            TokenError::TokenRevoked,
            TokenError::NotRegistered,
        ] {
            assert_eq!(
                status_and_code(error),
                (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED)
            );
        }
    }

    #[test]
    fn test_wrong_token_kind_has_its_own_code() {
        let error = AuthError::WrongTokenKind {
            expected: TokenKind::Access,
            actual: TokenKind::Refresh,
        };
        assert_eq!(
            status_and_code(error),
            (StatusCode::UNAUTHORIZED, error_codes::WRONG_TOKEN_KIND)
        );
    }

    #[test]
    fn test_auth_error_statuses() {
        assert_eq!(
            status_and_code(AuthError::InvalidCredentials),
            (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS)
        );
        assert_eq!(
            status_and_code(AuthError::EmailAlreadyInUse),
            (StatusCode::CONFLICT, error_codes::CONFLICT)
        );
        assert_eq!(
            status_and_code(AuthError::UserNotFound),
            (StatusCode::NOT_FOUND, error_codes::NOT_FOUND)
        );
        assert_eq!(
            status_and_code(ValidationError::InvalidEmail),
            (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR)
        );
    }

    #[actix_web::test]
    async fn test_internal_errors_hide_details() {
        let error = ApiError::from(DomainError::Internal {
            message: "connection string leaked".to_string(),
        });
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], error_codes::INTERNAL_ERROR);
        assert_eq!(body["message"], INTERNAL_MESSAGE);

        assert_eq!(
            status_and_code(TokenError::TokenGenerationFailed),
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        );
    }
}
