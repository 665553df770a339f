use actix_web::{web, HttpResponse};
use validator::Validate;

use parley_core::repositories::{TokenRegistry, UserRepository};
use parley_core::services::PasswordHasher;

use crate::app::AppState;
use crate::dto::{MessageResponse, UpdateUserRequest};
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/users
pub async fn list_users<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    _auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    R: TokenRegistry + 'static,
{
    let users = state.user_service.list().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Handler for PUT /api/users
///
/// Updates the caller's own account. Only the fields present in the body
/// change.
pub async fn update_user<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    auth: AuthContext,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    R: TokenRegistry + 'static,
{
    let request = body.into_inner();
    request.validate()?;

    state.user_service.update(auth.user_id, request.into()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User updated successfully")))
}

/// Handler for DELETE /api/users
///
/// Deletes the caller's own account and revokes every token issued to
/// it, including refresh tokens and those from other logins.
pub async fn delete_user<U, P, R>(
    state: web::Data<AppState<U, P, R>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    R: TokenRegistry + 'static,
{
    state.user_service.delete(auth.user_id).await?;
    state.token_service.revoke_subject(&auth.token.subject);

    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}
