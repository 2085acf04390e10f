//! Annotation spans and the trailing-entity policy.

use std::fmt;

/// Kind of an annotation span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpanKind {
    /// Shortened URL with an expanded target.
    Link,
    /// Reference to another account.
    Mention,
    /// Hashtag.
    Hashtag,
    /// Embedded picture or video.
    Media,
}

impl SpanKind {
    /// Lowercase name used in logs and error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Mention => "mention",
            Self::Hashtag => "hashtag",
            Self::Media => "media",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific data carried by a span.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum SpanPayload {
    /// Link to `url`, shown as `display`.
    Link {
        /// Expanded target URL.
        url: String,
        /// Text shown in place of the shortened URL.
        display: String,
    },
    /// Mention of the account `handle` (without `@`).
    Mention {
        /// Account handle.
        handle: String,
    },
    /// Hashtag `tag` (without `#`).
    Hashtag {
        /// Tag text.
        tag: String,
    },
    /// Media attachment served from `url`.
    Media {
        /// Direct URL of the media file.
        url: String,
    },
}

impl SpanPayload {
    /// The kind tag of this payload.
    #[must_use]
    pub fn kind(&self) -> SpanKind {
        match self {
            Self::Link { .. } => SpanKind::Link,
            Self::Mention { .. } => SpanKind::Mention,
            Self::Hashtag { .. } => SpanKind::Hashtag,
            Self::Media { .. } => SpanKind::Media,
        }
    }
}

/// Annotated half-open range `[start, end)` of the source text.
///
/// Offsets are UTF-8 byte offsets into the text and must fall on `char`
/// boundaries. Feeds that count offsets in other units convert them before
/// building spans (see `labrat-feed`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
    /// Kind-specific data.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub payload: SpanPayload,
}

impl Span {
    /// Create a span over `[start, end)`.
    #[must_use]
    pub fn new(start: usize, end: usize, payload: SpanPayload) -> Self {
        Self {
            start,
            end,
            payload,
        }
    }

    /// Create a link span.
    #[must_use]
    pub fn link(start: usize, end: usize, url: impl Into<String>, display: impl Into<String>) -> Self {
        Self::new(
            start,
            end,
            SpanPayload::Link {
                url: url.into(),
                display: display.into(),
            },
        )
    }

    /// Create a mention span.
    #[must_use]
    pub fn mention(start: usize, end: usize, handle: impl Into<String>) -> Self {
        Self::new(
            start,
            end,
            SpanPayload::Mention {
                handle: handle.into(),
            },
        )
    }

    /// Create a hashtag span.
    #[must_use]
    pub fn hashtag(start: usize, end: usize, tag: impl Into<String>) -> Self {
        Self::new(start, end, SpanPayload::Hashtag { tag: tag.into() })
    }

    /// Create a media span.
    #[must_use]
    pub fn media(start: usize, end: usize, url: impl Into<String>) -> Self {
        Self::new(start, end, SpanPayload::Media { url: url.into() })
    }

    /// The kind tag of this span.
    #[must_use]
    pub fn kind(&self) -> SpanKind {
        self.payload.kind()
    }

    /// Media URL, if this is a media span.
    #[must_use]
    pub fn media_url(&self) -> Option<&str> {
        match &self.payload {
            SpanPayload::Media { url } => Some(url),
            _ => None,
        }
    }
}

/// Why a render is happening, used to decide whether an end-of-text span
/// is an auto-appended reference that should be dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrailingPolicy {
    /// The post text was cut short by the feed and ends with a permalink.
    pub is_truncated: bool,
    /// The post quotes another post and ends with a link to it.
    pub is_quoted: bool,
}

impl TrailingPolicy {
    /// Policy for a post that is neither truncated nor quoting.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether a trailing link should be dropped under this policy.
    #[must_use]
    pub fn drops_trailing_link(self) -> bool {
        self.is_truncated || self.is_quoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_kind_from_payload() {
        assert_eq!(Span::link(0, 1, "u", "d").kind(), SpanKind::Link);
        assert_eq!(Span::mention(0, 1, "h").kind(), SpanKind::Mention);
        assert_eq!(Span::hashtag(0, 1, "t").kind(), SpanKind::Hashtag);
        assert_eq!(Span::media(0, 1, "m").kind(), SpanKind::Media);
    }

    #[test]
    fn test_media_url() {
        assert_eq!(Span::media(0, 1, "https://pbs/x.jpg").media_url(), Some("https://pbs/x.jpg"));
        assert_eq!(Span::hashtag(0, 1, "t").media_url(), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SpanKind::Hashtag.to_string(), "hashtag");
    }

    #[test]
    fn test_policy_drops_trailing_link() {
        assert!(!TrailingPolicy::none().drops_trailing_link());
        assert!(
            TrailingPolicy {
                is_truncated: true,
                is_quoted: false
            }
            .drops_trailing_link()
        );
        assert!(
            TrailingPolicy {
                is_truncated: false,
                is_quoted: true
            }
            .drops_trailing_link()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_flattens_payload_with_kind_tag() {
        let span = Span::link(6, 20, "https://example.com", "example.com");
        let value = serde_json::to_value(&span).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "start": 6,
                "end": 20,
                "kind": "link",
                "url": "https://example.com",
                "display": "example.com"
            })
        );
        let parsed: Span = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, span);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_unknown_kind() {
        let json = r#"{"start":0,"end":1,"kind":"poll","options":[]}"#;
        assert!(serde_json::from_str::<Span>(json).is_err());
    }
}
