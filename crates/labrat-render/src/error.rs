//! Error types for span rendering.

use crate::span::SpanKind;

/// Error from a single render call.
///
/// All variants are local to one call and are not worth retrying: the same
/// input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Span offsets are out of range, empty, or split a character.
    #[error("invalid span [{start}, {end}) over text of length {len}: {reason}")]
    InvalidSpan {
        /// Span start offset.
        start: usize,
        /// Span end offset.
        end: usize,
        /// Length of the text the span was checked against.
        len: usize,
        /// What is wrong with the offsets.
        reason: &'static str,
    },

    /// Two spans intersect beyond a shared boundary.
    #[error("span [{}, {}) overlaps span [{}, {})", .first.0, .first.1, .second.0, .second.1)]
    Overlap {
        /// Range of the earlier span.
        first: (usize, usize),
        /// Range of the later span.
        second: (usize, usize),
    },

    /// No inline renderer exists for this span kind.
    #[error("no inline renderer for {kind} spans")]
    Unrenderable {
        /// Kind that could not be rendered.
        kind: SpanKind,
    },
}

impl RenderError {
    /// Whether the error comes from malformed span data rather than a
    /// renderer that does not know a kind.
    ///
    /// Callers fall back to escaping the raw text on data errors; an
    /// [`Unrenderable`](Self::Unrenderable) error means the renderer is out
    /// of date with the feed schema.
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::InvalidSpan { .. } | Self::Overlap { .. })
    }
}
