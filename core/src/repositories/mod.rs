pub mod token;
pub mod user;

pub use token::{InMemoryTokenRegistry, TokenRegistry};
pub use user::UserRepository;

#[cfg(test)]
pub use user::MockUserRepository;
