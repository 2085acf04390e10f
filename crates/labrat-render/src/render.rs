//! Entry points composing normalization and reconstruction.

use crate::backend::SpanRenderer;
use crate::error::RenderError;
use crate::html::HtmlRenderer;
use crate::normalize::normalize;
use crate::reconstruct::reconstruct;
use crate::span::{Span, TrailingPolicy};

/// Result of rendering annotated text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    /// Markup ready for the chat platform.
    pub markup: String,
    /// Media spans left out of the markup, in document order.
    ///
    /// Each one must be delivered as a separate attachment.
    pub excluded_media: Vec<Span>,
}

impl Rendered {
    /// URLs of the excluded media, in document order.
    pub fn media_urls(&self) -> impl Iterator<Item = &str> + '_ {
        self.excluded_media.iter().filter_map(Span::media_url)
    }
}

/// Render `text` annotated with `spans` using `renderer`.
///
/// `spans` may be in any order. See [`normalize`](crate::normalize) for the
/// trailing-span policy and [`reconstruct`](crate::reconstruct) for how the
/// markup is assembled.
///
/// # Errors
///
/// Returns [`RenderError::InvalidSpan`] or [`RenderError::Overlap`] for
/// malformed spans and [`RenderError::Unrenderable`] when `renderer` cannot
/// render a span kind. Nothing is returned on failure.
pub fn render_annotated_text<R>(
    text: &str,
    spans: Vec<Span>,
    policy: TrailingPolicy,
    renderer: &R,
) -> Result<Rendered, RenderError>
where
    R: SpanRenderer + ?Sized,
{
    let normalized = normalize(text, spans, policy)?;
    tracing::debug!(
        inline = normalized.inline.len(),
        media = normalized.excluded_media.len(),
        "rendering annotated text"
    );
    let markup = reconstruct(normalized.text, &normalized.inline, renderer)?;
    Ok(Rendered {
        markup,
        excluded_media: normalized.excluded_media,
    })
}

/// Render with the default [`HtmlRenderer`].
///
/// # Errors
///
/// Same as [`render_annotated_text`].
///
/// # Examples
///
/// ```
/// use labrat_render::{Span, TrailingPolicy, render_html};
///
/// let text = "hello #rust";
/// let spans = vec![Span::hashtag(6, 11, "rust")];
/// let rendered = render_html(text, spans, TrailingPolicy::none()).unwrap();
/// assert_eq!(
///     rendered.markup,
///     r#"hello <a href="https://twitter.com/hashtag/rust">#rust</a>"#
/// );
/// ```
pub fn render_html(
    text: &str,
    spans: Vec<Span>,
    policy: TrailingPolicy,
) -> Result<Rendered, RenderError> {
    render_annotated_text(text, spans, policy, &HtmlRenderer::new())
}
