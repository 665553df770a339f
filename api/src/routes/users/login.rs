use actix_web::{web, HttpResponse};
use validator::Validate;

use parley_core::repositories::{TokenRegistry, UserRepository};
use parley_core::services::PasswordHasher;

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/users/login
///
/// Checks the credentials and issues an access/refresh token pair.
///
/// # Request Body
///
/// ```json
/// { "email": "u@x.com", "password": "secret" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "id": "550e8400-e29b-41d4-a716-446655440000",
///     "name": "U",
///     "email": "u@x.com",
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed body
/// - 401 Unauthorized: Unknown email or wrong password (`INVALID_CREDENTIALS`)
pub async fn login<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    R: TokenRegistry + 'static,
{
    let request = body.into_inner();
    request.validate()?;

    let response = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
