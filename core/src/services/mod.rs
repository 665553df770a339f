//! Business services containing domain logic and use cases.

pub mod auth;
pub mod password;
pub mod policy;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::AuthService;
pub use password::PasswordHasher;
pub use policy::TokenPolicy;
pub use token::{
    CleanupResult, TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig,
    TokenSigner,
};
pub use user::{NewUser, UserService, UserUpdate};
