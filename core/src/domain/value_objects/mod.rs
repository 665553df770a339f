//! Value objects representing immutable domain concepts.

pub mod login_response;

// Re-export commonly used types
pub use login_response::LoginResponse;
