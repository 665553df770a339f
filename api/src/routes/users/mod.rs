//! User route handlers
//!
//! - Login (open)
//! - Registration (open)
//! - Listing, self-update and self-delete (access token required)

pub mod account;
pub mod create;
pub mod login;

pub use account::{delete_user, list_users, update_user};
pub use create::create_user;
pub use login::login;
