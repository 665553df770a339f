//! Application state and factory
//!
//! This module holds the shared services and builds the actix-web
//! application around them.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};
use parley_core::repositories::{TokenRegistry, UserRepository};
use parley_core::services::{AuthService, PasswordHasher, TokenService, UserService};
use parley_shared::{config::CorsConfig, error_codes, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::middleware::{auth::JwtAuth, cors::create_cors, TokenAuthenticator};
use crate::routes::{health, users};

/// Application state that holds shared services
pub struct AppState<U, P, R>
where
    U: UserRepository,
    P: PasswordHasher,
    R: TokenRegistry,
{
    pub auth_service: Arc<AuthService<U, P, R>>,
    pub user_service: Arc<UserService<U, P>>,
    pub token_service: Arc<TokenService<R>>,
}

impl<U, P, R> AppState<U, P, R>
where
    U: UserRepository,
    P: PasswordHasher,
    R: TokenRegistry,
{
    /// Wire the services around one user store, hasher and token service
    pub fn new(
        user_repository: Arc<U>,
        password_hasher: Arc<P>,
        token_service: Arc<TokenService<R>>,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&user_repository),
                Arc::clone(&password_hasher),
                Arc::clone(&token_service),
            )),
            user_service: Arc::new(UserService::new(user_repository, password_hasher)),
            token_service,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, P, R>(
    app_state: web::Data<AppState<U, P, R>>,
    cors: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    R: TokenRegistry + 'static,
{
    let authenticator: Arc<dyn TokenAuthenticator> = app_state.token_service.clone();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(authenticator))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(create_cors(cors))
        .wrap(Logger::default())
        // Probes
        .route("/readiness", web::get().to(health::readiness))
        .route("/err", web::get().to(health::error_probe))
        // User routes
        .service(
            web::scope("/api/users")
                .route("/login", web::post().to(users::login::<U, P, R>))
                .route("/create", web::post().to(users::create_user::<U, P, R>))
                .service(
                    web::resource("")
                        .wrap(JwtAuth::access_only())
                        .route(web::get().to(users::list_users::<U, P, R>))
                        .route(web::put().to(users::update_user::<U, P, R>))
                        .route(web::delete().to(users::delete_user::<U, P, R>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
