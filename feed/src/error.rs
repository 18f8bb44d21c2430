//! Unified error types for Feedline
//!
//! This module defines error types for each layer:
//! - `FeedError`: Failures the feed controller understands (fetch and action outcomes)
//! - `ClientError`: Feed REST API client errors
//! - `ConfigError`: Environment and reason table loading errors

use thiserror::Error;

/// Fallback shown when a page fetch fails without a server-provided message
pub const DEFAULT_LOAD_ERROR: &str = "Greška pri učitavanju.";

/// Fallback shown when a like fails without a server-provided message
pub const DEFAULT_LIKE_ERROR: &str = "Greška pri lajku.";

/// Fallback shown when a report fails without a server-provided message
pub const DEFAULT_REPORT_ERROR: &str = "Greška pri prijavi.";

/// Domain error taxonomy seen by the streams and the aggregator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Server rejected request ({status}){}", rejection_suffix(.message))]
    ServerRejection {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}

fn rejection_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl FeedError {
    /// Message suitable for showing to the user, if the failure carried one
    pub fn user_message(&self) -> Option<&str> {
        match self {
            FeedError::ServerRejection {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// User-facing message, or `fallback` when the failure carries none
    pub fn user_message_or(&self, fallback: &str) -> String {
        self.user_message().unwrap_or(fallback).to_string()
    }
}

/// Feed REST API client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Body the feed API sends alongside 4xx/5xx responses
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

/// Pull the `error` field out of a JSON error body, falling back to the raw text
fn extract_api_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.filter(|m| !m.trim().is_empty()),
        Err(_) => Some(body.to_string()),
    }
}

impl From<ClientError> for FeedError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Request(err) => match err.status() {
                Some(status) => FeedError::ServerRejection {
                    status: status.as_u16(),
                    message: None,
                },
                None => FeedError::NetworkFailure(err.to_string()),
            },
            ClientError::Api { status, message } => FeedError::ServerRejection {
                status,
                message: extract_api_message(&message),
            },
            ClientError::Deserialization(msg) => FeedError::NetworkFailure(msg),
            ClientError::Configuration(msg) => FeedError::NetworkFailure(msg),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read reason table {path}: {source}")]
    ReasonTableIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse reason table {path}: {source}")]
    ReasonTableParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
