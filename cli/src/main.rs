//! Feedline CLI
//!
//! Terminal front end for the feed controller. Configuration comes from
//! environment variables (see `feedline::Config`); the actor can be overridden
//! with `--user`.

mod commands;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use feedline::{
    Config, FeedAggregator, FeedApiClient, ReasonRanker, SessionIdentity, StreamKind, UserId,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "feedline", version, about = "Friends and recommended feed in the terminal")]
struct Cli {
    /// User to load the feed for (defaults to FEEDLINE_USER_ID)
    #[arg(long, global = true, env = "FEEDLINE_USER_ID")]
    user: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the first page of both streams
    Feed,
    /// Load more pages of the friends stream
    More {
        #[arg(default_value_t = 1)]
        pages: u32,
    },
    /// Reload recommendations with a different limit
    Recommended { limit: u32 },
    /// Like a post
    Like {
        id: String,
        #[arg(long, value_enum, default_value_t = Origin::Friends)]
        from: Origin,
    },
    /// Report a post
    Report {
        id: String,
        reason: Option<String>,
        #[arg(long, value_enum, default_value_t = Origin::Friends)]
        from: Origin,
    },
}

/// Stream the acted-on post was shown in
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Origin {
    Friends,
    Recommended,
}

impl From<Origin> for StreamKind {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Friends => StreamKind::Friends,
            Origin::Recommended => StreamKind::Recommended,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the rendered feed
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let client = Arc::new(
        FeedApiClient::new(&config.api_url, config.api_token.as_deref())
            .context("Failed to build HTTP client")?,
    );
    let ranker = ReasonRanker::new(
        config
            .reason_table()
            .context("Failed to load reason table")?,
    );

    let identity = Arc::new(SessionIdentity::new());
    if let Some(user) = cli
        .user
        .map(UserId::from)
        .or_else(|| config.user_id.clone())
        .filter(|id| !id.is_blank())
    {
        identity.sign_in(user);
    }

    let aggregator = FeedAggregator::new(
        client.clone(),
        client.clone(),
        client,
        identity,
        ranker,
        config.feed_settings(),
    );

    tracing::info!(api_url = %config.api_url, "Starting feedline");
    aggregator.sync_identity().await;
    if aggregator.actor().is_none() {
        tracing::warn!("No user given; set FEEDLINE_USER_ID or pass --user");
    }

    let output = commands::run(&aggregator, cli.command.unwrap_or(Command::Feed)).await;
    println!("{}", output);

    Ok(())
}
