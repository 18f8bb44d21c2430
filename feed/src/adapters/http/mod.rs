//! Feed REST API adapter
//!
//! Implementation of the data source and action ports over HTTP.

pub mod client;

pub use client::FeedApiClient;
