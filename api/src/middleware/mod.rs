pub mod auth;
pub mod cors;

pub use auth::{extract_bearer_token, AuthContext, JwtAuth, TokenAuthenticator};
pub use cors::create_cors;
