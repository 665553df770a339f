//! Authentication service module
//!
//! Login checks credentials against the user store and, on success, issues
//! a registered access/refresh token pair.

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
