//! Right-to-left rebuild of the output markup.

use std::borrow::Cow;

use crate::backend::SpanRenderer;
use crate::error::RenderError;
use crate::escape::escape_html;
use crate::span::Span;

/// Rebuild `text` with `spans` replaced by rendered markup.
///
/// `spans` must be ordered by descending `start`, non-overlapping and within
/// `text` (the output of [`normalize`](crate::normalize)). Processing from the
/// highest offset down keeps every remaining offset pointing into untouched
/// source text. Text between spans is escaped; rendered fragments are not.
///
/// Fragments are collected back to front and joined once at the end, so no
/// output exists until every span has rendered.
///
/// # Errors
///
/// Returns [`RenderError::Unrenderable`] if `renderer` has no inline form for
/// a span, and [`RenderError::InvalidSpan`] if a span does not fit before the
/// previously processed one.
pub fn reconstruct<R>(text: &str, spans: &[Span], renderer: &R) -> Result<String, RenderError>
where
    R: SpanRenderer + ?Sized,
{
    let mut fragments: Vec<Cow<'_, str>> = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = text.len();

    for span in spans {
        if span.end > cursor || span.start >= span.end {
            return Err(RenderError::InvalidSpan {
                start: span.start,
                end: span.end,
                len: text.len(),
                reason: "span is out of descending order",
            });
        }
        let gap = text.get(span.end..cursor).ok_or(RenderError::InvalidSpan {
            start: span.start,
            end: span.end,
            len: text.len(),
            reason: "offset splits a character",
        })?;
        fragments.push(escape_html(gap));

        let mut markup = String::new();
        renderer.render(span, &mut markup)?;
        tracing::trace!(kind = %span.kind(), start = span.start, end = span.end, "rendered span");
        fragments.push(Cow::Owned(markup));

        cursor = span.start;
    }

    let head = text.get(..cursor).ok_or(RenderError::InvalidSpan {
        start: cursor,
        end: cursor,
        len: text.len(),
        reason: "offset splits a character",
    })?;
    fragments.push(escape_html(head));

    let capacity = fragments.iter().map(|f| f.len()).sum();
    let mut out = String::with_capacity(capacity);
    for fragment in fragments.iter().rev() {
        out.push_str(fragment);
    }
    Ok(out)
}
