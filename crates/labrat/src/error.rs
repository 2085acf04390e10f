//! CLI error types.

use labrat_config::ConfigError;
use labrat_feed::FeedError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Feed(#[from] FeedError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
