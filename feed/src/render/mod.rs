//! Feed rendering
//!
//! Renders stream snapshots to plain markdown for terminals.

pub mod renderer;

pub use renderer::render_feed;
