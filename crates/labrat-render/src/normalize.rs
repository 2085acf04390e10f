//! Span validation, ordering and the trailing-entity drop policy.

use crate::error::RenderError;
use crate::span::{Span, SpanKind, TrailingPolicy};

/// Spans checked and split for reconstruction.
#[derive(Debug, PartialEq, Eq)]
pub struct Normalized<'a> {
    /// Source text, shortened when a trailing span was dropped.
    pub text: &'a str,
    /// Inline spans ordered by descending `start`.
    pub inline: Vec<Span>,
    /// Media spans removed from the inline set, in ascending order.
    pub excluded_media: Vec<Span>,
}

/// Validate, order and filter `spans` over `text`.
///
/// Steps:
/// 1. Sort by `start` and reject malformed or overlapping spans.
/// 2. Drop the last span when it reaches the end of the text and is either
///    media or a link while the post is truncated or quoting. The text is cut
///    at the dropped span's start.
/// 3. Move media spans out of the inline set.
/// 4. Order the remaining spans by descending `start`.
///
/// # Errors
///
/// Returns [`RenderError::InvalidSpan`] for empty, out of range or
/// non-char-boundary offsets and [`RenderError::Overlap`] for spans that
/// intersect beyond a shared boundary.
pub fn normalize(
    text: &str,
    mut spans: Vec<Span>,
    policy: TrailingPolicy,
) -> Result<Normalized<'_>, RenderError> {
    for span in &spans {
        validate_range(text, span)?;
    }

    spans.sort_by_key(|s| (s.start, s.end));

    if let Some(pair) = spans.windows(2).find(|w| w[0].end > w[1].start) {
        return Err(RenderError::Overlap {
            first: (pair[0].start, pair[0].end),
            second: (pair[1].start, pair[1].end),
        });
    }

    let mut text = text;
    let mut trailing_media = None;
    let drop_last = spans
        .last()
        .is_some_and(|last| last.end == text.len() && is_auto_appended(last.kind(), policy));
    if drop_last && let Some(last) = spans.pop() {
        tracing::debug!(kind = %last.kind(), start = last.start, "dropping trailing span");
        text = &text[..last.start];
        if last.kind() == SpanKind::Media {
            trailing_media = Some(last);
        }
    }

    let (mut excluded_media, mut inline): (Vec<Span>, Vec<Span>) = spans
        .into_iter()
        .partition(|s| s.kind() == SpanKind::Media);
    excluded_media.extend(trailing_media);

    // Ascending after the sort above, so reversing yields descending starts.
    inline.reverse();

    Ok(Normalized {
        text,
        inline,
        excluded_media,
    })
}

/// Whether a span of `kind` ending the text is a reference the feed appended.
fn is_auto_appended(kind: SpanKind, policy: TrailingPolicy) -> bool {
    match kind {
        SpanKind::Media => true,
        SpanKind::Link => policy.drops_trailing_link(),
        SpanKind::Mention | SpanKind::Hashtag => false,
    }
}

/// Check `0 <= start < end <= text.len()` with both offsets on char boundaries.
fn validate_range(text: &str, span: &Span) -> Result<(), RenderError> {
    let invalid = |reason| RenderError::InvalidSpan {
        start: span.start,
        end: span.end,
        len: text.len(),
        reason,
    };

    if span.start >= span.end {
        return Err(invalid("start is not before end"));
    }
    if span.end > text.len() {
        return Err(invalid("end is past the end of the text"));
    }
    if !text.is_char_boundary(span.start) || !text.is_char_boundary(span.end) {
        return Err(invalid("offset splits a character"));
    }
    Ok(())
}
