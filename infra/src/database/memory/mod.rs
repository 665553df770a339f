//! Process-local storage; contents are lost on restart.

mod user_repository;

pub use user_repository::InMemoryUserRepository;
