//! Domain layer
//!
//! Contains pure feed logic with no external dependencies.
//! - `entities`: Content items and recommendation entries
//! - `ports`: Trait definitions for data sources, actions and identity

pub mod entities;
pub mod ports;
