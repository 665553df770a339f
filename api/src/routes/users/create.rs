use actix_web::{web, HttpResponse};
use validator::Validate;

use parley_core::repositories::{TokenRegistry, UserRepository};
use parley_core::services::PasswordHasher;

use crate::app::AppState;
use crate::dto::CreateUserRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/users/create
///
/// Registers a new user and returns its public profile with 201 Created.
///
/// ## Errors
/// - 400 Bad Request: Invalid name, email or password
/// - 409 Conflict: Email already registered
pub async fn create_user<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    R: TokenRegistry + 'static,
{
    let request = body.into_inner();
    request.validate()?;

    let profile = state.user_service.create(request.into()).await?;
    Ok(HttpResponse::Created().json(profile))
}
