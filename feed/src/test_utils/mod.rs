//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Mocks are plain in-memory structs instead of mockall: they record every call
//! so tests can assert on fetch counts and arguments directly.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
