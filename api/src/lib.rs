//! # Parley API
//!
//! actix-web front end: routes, bearer-token middleware, error mapping and
//! request DTOs. The binary in `main.rs` wires these to concrete services.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
