//! Bearer-token authentication middleware for protecting API endpoints.
//!
//! The middleware pulls the token out of the `Authorization` header, hands
//! it to the token service for signature and registry checks, applies the
//! route's [`TokenPolicy`] and injects an [`AuthContext`] into the request.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use parley_core::{
    domain::entities::token::{AuthenticatedToken, Token},
    errors::{DomainError, TokenError},
    repositories::TokenRegistry,
    services::{TokenPolicy, TokenService},
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use crate::handlers::ApiError;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User id taken from the token subject
    pub user_id: Uuid,
    /// Registry copy of the presented token
    pub token: Token,
    /// The bearer string as presented
    pub raw: String,
}

impl AuthContext {
    /// Builds a context from an authenticated token
    pub fn from_authenticated(authenticated: AuthenticatedToken) -> Result<Self, TokenError> {
        let user_id = Uuid::parse_str(authenticated.subject())
            .map_err(|_| TokenError::InvalidTokenFormat)?;
        Ok(Self {
            user_id,
            token: authenticated.token,
            raw: authenticated.raw,
        })
    }
}

/// Object-safe view of the token service, stored in app data
pub trait TokenAuthenticator: Send + Sync {
    fn authenticate(&self, raw: &str) -> Result<AuthenticatedToken, TokenError>;
}

impl<R: TokenRegistry> TokenAuthenticator for TokenService<R> {
    fn authenticate(&self, raw: &str) -> Result<AuthenticatedToken, TokenError> {
        TokenService::authenticate(self, raw)
    }
}

/// Authentication middleware factory
pub struct JwtAuth {
    policy: TokenPolicy,
}

impl JwtAuth {
    /// Middleware enforcing a specific policy
    pub fn new(policy: TokenPolicy) -> Self {
        Self { policy }
    }

    /// Middleware that only lets access tokens through
    pub fn access_only() -> Self {
        Self::new(TokenPolicy::access())
    }
}

impl Default for JwtAuth {
    fn default() -> Self {
        Self::access_only()
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            policy: self.policy,
        }))
    }
}

/// Authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    policy: TokenPolicy,
}

impl<S> JwtAuthMiddleware<S> {
    fn authorize(req: &ServiceRequest, policy: TokenPolicy) -> Result<AuthContext, ApiError> {
        let authenticator = req
            .app_data::<web::Data<Arc<dyn TokenAuthenticator>>>()
            .ok_or_else(|| DomainError::Internal {
                message: "token authenticator is not registered".to_string(),
            })?;

        let raw = extract_bearer_token(req.headers()).ok_or(TokenError::MissingToken)?;
        let authenticated = authenticator.authenticate(&raw)?;
        policy.check(&authenticated.token)?;

        Ok(AuthContext::from_authenticated(authenticated)?)
    }
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let policy = self.policy;

        Box::pin(async move {
            match Self::authorize(&req, policy) {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    log::debug!("Rejected {} {}: {}", req.method(), req.path(), error);
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header
///
/// The scheme is matched case-insensitively and must be followed by a
/// single space and exactly one non-empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    if token.chars().any(char::is_whitespace) {
        return None;
    }

    Some(token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(TokenError::MissingToken).into());

        ready(result)
    }
}
