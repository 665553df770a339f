//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use parley_api::AppState;
use parley_core::repositories::InMemoryTokenRegistry;
use parley_core::services::{TokenService, TokenServiceConfig};
use parley_infra::{BcryptPasswordHasher, InMemoryUserRepository};

pub const SECRET: &str = "http-test-secret";

pub type TestState = AppState<InMemoryUserRepository, BcryptPasswordHasher, InMemoryTokenRegistry>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub registry: Arc<InMemoryTokenRegistry>,
    pub tokens: Arc<TokenService<InMemoryTokenRegistry>>,
}

pub fn context() -> TestContext {
    let registry = Arc::new(InMemoryTokenRegistry::new());
    let tokens = Arc::new(TokenService::new(
        Arc::clone(&registry),
        TokenServiceConfig::new(SECRET),
    ));
    let state = web::Data::new(AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        // Lowest bcrypt cost keeps the tests fast
        Arc::new(BcryptPasswordHasher::new(4)),
        Arc::clone(&tokens),
    ));

    TestContext {
        state,
        registry,
        tokens,
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
