//! User storage implementations

pub mod memory;
