pub mod user;

pub use user::{CreateUserRequest, LoginRequest, MessageResponse, UpdateUserRequest};
