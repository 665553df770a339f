//! User account management: registration, listing, self-update and
//! self-delete.

mod service;

#[cfg(test)]
mod tests;

pub use service::{NewUser, UserService, UserUpdate};
