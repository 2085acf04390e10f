//! Telegram HTML renderer.
//!
//! Produces `<a>` anchors understood by the Bot API's `HTML` parse mode.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::backend::SpanRenderer;
use crate::escape::escape_html;

/// Characters left unencoded by `encodeURIComponent`: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Default base URL for account profiles.
pub const DEFAULT_PROFILE_BASE_URL: &str = "https://twitter.com";

/// Default base URL for hashtag searches.
pub const DEFAULT_HASHTAG_BASE_URL: &str = "https://twitter.com/hashtag";

/// Percent-encode a URL path component.
///
/// # Examples
///
/// ```
/// use labrat_render::encode_uri_component;
///
/// assert_eq!(encode_uri_component("日本"), "%E6%97%A5%E6%9C%AC");
/// assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
/// ```
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Where mention and hashtag anchors point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RendererOptions {
    /// Profile URLs are `{profile_base_url}/{handle}`.
    pub profile_base_url: String,
    /// Hashtag URLs are `{hashtag_base_url}/{tag}`.
    pub hashtag_base_url: String,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            profile_base_url: DEFAULT_PROFILE_BASE_URL.to_owned(),
            hashtag_base_url: DEFAULT_HASHTAG_BASE_URL.to_owned(),
        }
    }
}

/// HTML span renderer.
///
/// - links: `<a href="url">display</a>`
/// - mentions: `<a href="{profile}/handle">@handle</a>`
/// - hashtags: `<a href="{hashtag}/tag">#tag</a>` with the tag percent-encoded in the URL
#[derive(Clone, Debug, Default)]
pub struct HtmlRenderer {
    options: RendererOptions,
}

impl HtmlRenderer {
    /// Create a renderer with the default base URLs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom base URLs.
    ///
    /// Trailing slashes on the base URLs are ignored.
    #[must_use]
    pub fn with_options(options: RendererOptions) -> Self {
        Self {
            options: RendererOptions {
                profile_base_url: options.profile_base_url.trim_end_matches('/').to_owned(),
                hashtag_base_url: options.hashtag_base_url.trim_end_matches('/').to_owned(),
            },
        }
    }

    /// Profile URL for `handle`, escaped for an attribute value.
    #[must_use]
    pub fn profile_url(&self, handle: &str) -> String {
        let url = format!(
            "{}/{}",
            self.options.profile_base_url,
            encode_uri_component(handle)
        );
        escape_html(&url).into_owned()
    }

    /// Permalink for post `id` by `handle`, escaped for an attribute value.
    #[must_use]
    pub fn status_url(&self, handle: &str, id: &str) -> String {
        let url = format!(
            "{}/{}/status/{}",
            self.options.profile_base_url,
            encode_uri_component(handle),
            encode_uri_component(id)
        );
        escape_html(&url).into_owned()
    }
}

impl SpanRenderer for HtmlRenderer {
    fn link(&self, url: &str, display: &str, out: &mut String) {
        write!(
            out,
            r#"<a href="{}">{}</a>"#,
            escape_html(url),
            escape_html(display)
        )
        .unwrap();
    }

    fn mention(&self, handle: &str, out: &mut String) {
        write!(
            out,
            r#"<a href="{}">@{}</a>"#,
            self.profile_url(handle),
            escape_html(handle)
        )
        .unwrap();
    }

    fn hashtag(&self, tag: &str, out: &mut String) {
        let url = format!(
            "{}/{}",
            self.options.hashtag_base_url,
            encode_uri_component(tag)
        );
        write!(
            out,
            r#"<a href="{}">#{}</a>"#,
            escape_html(&url),
            escape_html(tag)
        )
        .unwrap();
    }
}
