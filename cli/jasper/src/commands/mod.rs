//! CLI command implementations.

pub mod platform;
