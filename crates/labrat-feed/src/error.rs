//! Error types for feed handling.

use labrat_render::RenderError;

/// Error from parsing or rendering a feed post.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The post JSON could not be parsed.
    #[error("invalid post JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The post's entities could not be rendered.
    #[error("failed to render post {id}: {source}")]
    Render {
        /// Id of the post that failed.
        id: String,
        /// Underlying render error.
        #[source]
        source: RenderError,
    },
}
