use std::env;
use std::str::FromStr;

use crate::app::{
    FeedSettings, ReasonPriorityTable, DEFAULT_DAY_WINDOW, DEFAULT_PAGE_SIZE,
    DEFAULT_RECOMMENDED_LIMIT,
};
use crate::domain::entities::UserId;
use crate::error::ConfigError;

#[derive(Clone)]
pub struct Config {
    /// Base URL of the feed REST API, including the `/api` prefix
    pub api_url: String,
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// Actor to sign in as on startup
    pub user_id: Option<UserId>,
    pub page_size: u32,
    /// Friends feed look-back window in days
    pub day_window: u32,
    pub recommended_limit: u32,
    /// Path to a JSON reason table overriding the built-in one
    pub reason_table_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_url: env::var("FEEDLINE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            api_token: env::var("FEEDLINE_API_TOKEN").ok().filter(|t| !t.is_empty()),
            user_id: env::var("FEEDLINE_USER_ID")
                .ok()
                .map(UserId::from)
                .filter(|id| !id.is_blank()),
            page_size: parse_var("FEEDLINE_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            day_window: parse_var("FEEDLINE_DAY_WINDOW", DEFAULT_DAY_WINDOW)?,
            recommended_limit: parse_var("FEEDLINE_RECOMMENDED_LIMIT", DEFAULT_RECOMMENDED_LIMIT)?,
            reason_table_path: env::var("FEEDLINE_REASON_TABLE").ok().filter(|p| !p.is_empty()),
        })
    }

    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            page_size: self.page_size,
            day_window: self.day_window,
            recommended_limit: self.recommended_limit,
        }
    }

    /// The configured reason table, or the built-in one
    pub fn reason_table(&self) -> Result<ReasonPriorityTable, ConfigError> {
        match &self.reason_table_path {
            Some(path) => ReasonPriorityTable::load(path),
            None => Ok(ReasonPriorityTable::default()),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value,
                })
        }
        _ => Ok(default),
    }
}
