//! Renderer trait for per-kind span markup.
//!
//! The reconstructor is generic over [`SpanRenderer`], so the markup dialect
//! lives in one place and the span walk stays the same for every dialect.

use crate::error::RenderError;
use crate::span::{Span, SpanKind, SpanPayload};

/// Per-kind markup for inline spans.
///
/// Implementations escape every untrusted substring they embed. The
/// reconstructor writes their output verbatim and never escapes it again.
pub trait SpanRenderer {
    /// Render a link to `url` displayed as `display`.
    fn link(&self, url: &str, display: &str, out: &mut String);

    /// Render a mention of `handle` (without `@`).
    fn mention(&self, handle: &str, out: &mut String);

    /// Render a hashtag `tag` (without `#`).
    fn hashtag(&self, tag: &str, out: &mut String);

    /// Render `span` by dispatching on its kind.
    ///
    /// Media has no inline form: it is delivered as a separate attachment.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Unrenderable`] for media spans.
    fn render(&self, span: &Span, out: &mut String) -> Result<(), RenderError> {
        match &span.payload {
            SpanPayload::Link { url, display } => self.link(url, display, out),
            SpanPayload::Mention { handle } => self.mention(handle, out),
            SpanPayload::Hashtag { tag } => self.hashtag(tag, out),
            SpanPayload::Media { .. } => {
                return Err(RenderError::Unrenderable {
                    kind: SpanKind::Media,
                });
            }
        }
        Ok(())
    }
}
