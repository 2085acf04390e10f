//! Entity-annotated rich-text renderer.
//!
//! Converts a post's plain text plus a set of offset-tagged spans (links,
//! mentions, hashtags, media) into HTML markup for a chat platform.
//!
//! # Architecture
//!
//! The pipeline is synchronous and pure:
//! - [`normalize`]: validates and orders spans, drops an auto-appended
//!   trailing link or media reference, moves media out of the inline set
//! - [`reconstruct`]: right-to-left fold interleaving rendered spans with
//!   escaped gaps
//! - [`SpanRenderer`]: per-kind markup, implemented by [`HtmlRenderer`]
//! - [`escape_html`]: the escaping primitive shared by all of the above
//!
//! Offsets are UTF-8 byte offsets into the text. Feeds reporting offsets in
//! UTF-16 code units or code points convert them first.
//!
//! # Example
//!
//! ```
//! use labrat_render::{Span, TrailingPolicy, render_html};
//!
//! let text = "hi @jack, see https://t.co/x";
//! let spans = vec![
//!     Span::mention(3, 8, "jack"),
//!     Span::link(14, 28, "https://example.com", "example.com"),
//! ];
//! let rendered = render_html(text, spans, TrailingPolicy::none()).unwrap();
//! assert_eq!(
//!     rendered.markup,
//!     r#"hi <a href="https://twitter.com/jack">@jack</a>, see <a href="https://example.com">example.com</a>"#
//! );
//! ```

mod backend;
mod error;
mod escape;
mod html;
mod normalize;
mod reconstruct;
mod render;
mod span;

pub use backend::SpanRenderer;
pub use error::RenderError;
pub use escape::escape_html;
pub use html::{
    DEFAULT_HASHTAG_BASE_URL, DEFAULT_PROFILE_BASE_URL, HtmlRenderer, RendererOptions,
    encode_uri_component,
};
pub use normalize::{Normalized, normalize};
pub use reconstruct::reconstruct;
pub use render::{Rendered, render_annotated_text, render_html};
pub use span::{Span, SpanKind, SpanPayload, TrailingPolicy};
