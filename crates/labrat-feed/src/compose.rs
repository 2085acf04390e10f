//! Relay message composition.
//!
//! Turns a feed post into one chat message: reposts get a `From @user:`
//! header, quotes get the quoted post appended, and every message ends with
//! a reply link to the post. Media found along the way is collected for
//! separate attachment delivery.

use std::convert::Infallible;
use std::fmt::Write;

use labrat_render::{
    HtmlRenderer, RenderError, Rendered, RendererOptions, TrailingPolicy, escape_html,
    render_annotated_text,
};

use serde::Serialize;

use crate::error::FeedError;
use crate::offset::OffsetUnit;
use crate::post::Post;
use crate::spans::post_spans;

/// Default label of the reply link.
pub const DEFAULT_REPLY_LABEL: &str = "Reply";

/// Markup dialect a message is written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    /// Telegram Bot API `HTML` parse mode.
    #[default]
    #[serde(rename = "HTML")]
    Html,
}

impl ParseMode {
    /// Value of the Bot API `parse_mode` parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "HTML",
        }
    }
}

/// A composed chat message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Message markup.
    pub text: String,
    /// Dialect of `text`.
    pub parse_mode: ParseMode,
    /// Media to deliver as separate attachments, in order, without duplicates.
    pub media_urls: Vec<String>,
}

/// Composer settings.
#[derive(Clone, Debug)]
pub struct ComposerOptions {
    /// Base URLs for mention, hashtag and permalink anchors.
    pub renderer: RendererOptions,
    /// Unit the feed counts entity offsets in.
    pub offset_unit: OffsetUnit,
    /// Label of the trailing reply link, `None` to omit the link.
    pub reply_label: Option<String>,
}

impl Default for ComposerOptions {
    fn default() -> Self {
        Self {
            renderer: RendererOptions::default(),
            offset_unit: OffsetUnit::default(),
            reply_label: Some(DEFAULT_REPLY_LABEL.to_owned()),
        }
    }
}

/// Builds chat messages from feed posts.
#[derive(Clone, Debug)]
pub struct Composer {
    renderer: HtmlRenderer,
    offset_unit: OffsetUnit,
    reply_label: Option<String>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(ComposerOptions::default())
    }
}

impl Composer {
    /// Create a composer.
    #[must_use]
    pub fn new(options: ComposerOptions) -> Self {
        Self {
            renderer: HtmlRenderer::with_options(options.renderer),
            offset_unit: options.offset_unit,
            reply_label: options.reply_label,
        }
    }

    /// Trailing policy for rendering `post`.
    #[must_use]
    pub fn policy(post: &Post) -> TrailingPolicy {
        TrailingPolicy {
            is_truncated: post.truncated,
            is_quoted: post.is_quoting(),
        }
    }

    /// Render the text of a single post, without framing.
    ///
    /// # Errors
    ///
    /// Returns the [`RenderError`] for malformed entities or an entity kind
    /// without an inline renderer.
    pub fn render_post(&self, post: &Post) -> Result<Rendered, RenderError> {
        let spans = post_spans(post, self.offset_unit)?;
        render_annotated_text(post.body(), spans, Self::policy(post), &self.renderer)
    }

    /// Compose a message, escaping a post's raw text when its entities fail to render.
    ///
    /// Malformed entities are logged as warnings. A kind without a renderer
    /// is logged as an error since it means the renderer is behind the feed
    /// schema. The message is produced either way, and media entities of a
    /// post that fell back are still collected.
    pub fn compose(&self, post: &Post) -> Message {
        let Ok(message) = self.build::<_, Infallible>(post, &mut |part, media| {
            Ok(self.render_or_escape(part, media))
        });
        message
    }

    /// Compose a message, failing on the first post whose entities do not render.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Render`] naming the post that failed.
    pub fn try_compose(&self, post: &Post) -> Result<Message, FeedError> {
        self.build(post, &mut |part, media| {
            let rendered = self.render_post(part).map_err(|source| FeedError::Render {
                id: part.id_str.clone(),
                source,
            })?;
            media.extend(rendered.media_urls().map(str::to_owned));
            Ok(rendered.markup)
        })
    }

    /// Parse `json` as a post and compose it.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Json`] if the post cannot be parsed.
    pub fn compose_json(&self, json: &str) -> Result<Message, FeedError> {
        let post = Post::from_json(json)?;
        Ok(self.compose(&post))
    }

    /// Assemble framing around post bodies produced by `body`.
    fn build<F, E>(&self, post: &Post, body: &mut F) -> Result<Message, E>
    where
        F: FnMut(&Post, &mut Vec<String>) -> Result<String, E>,
    {
        let mut media = Vec::new();
        let mut text = String::new();

        if let Some(original) = &post.retweeted_status {
            tracing::debug!(id = %post.id_str, original = %original.id_str, "composing repost");
            self.push_from_header(&original.user.screen_name, &mut text);
            self.push_body(original, body, &mut text, &mut media)?;
        } else {
            self.push_body(post, body, &mut text, &mut media)?;
        }

        if let Some(label) = &self.reply_label {
            write!(
                text,
                "\n\n<a href=\"{}\">{}</a>",
                self.renderer.status_url(&post.user.screen_name, &post.id_str),
                escape_html(label)
            )
            .unwrap();
        }

        Ok(Message {
            text,
            parse_mode: ParseMode::Html,
            media_urls: dedup(media),
        })
    }

    /// Push a post's body and, if it quotes another post, the quoted body.
    fn push_body<F, E>(
        &self,
        post: &Post,
        body: &mut F,
        text: &mut String,
        media: &mut Vec<String>,
    ) -> Result<(), E>
    where
        F: FnMut(&Post, &mut Vec<String>) -> Result<String, E>,
    {
        text.push_str(&body(post, media)?);

        if let Some(quoted) = &post.quoted_status {
            text.push_str("\n\n");
            self.push_from_header(&quoted.user.screen_name, text);
            text.push_str(&body(quoted, media)?);
        }
        Ok(())
    }

    fn push_from_header(&self, handle: &str, text: &mut String) {
        writeln!(
            text,
            "From <a href=\"{}\">@{}</a>:",
            self.renderer.profile_url(handle),
            escape_html(handle)
        )
        .unwrap();
    }

    fn render_or_escape(&self, post: &Post, media: &mut Vec<String>) -> String {
        match self.render_post(post) {
            Ok(rendered) => {
                media.extend(rendered.media_urls().map(str::to_owned));
                rendered.markup
            }
            Err(err) => {
                if err.is_data_error() {
                    tracing::warn!(id = %post.id_str, error = %err, "malformed entities, sending plain text");
                } else {
                    tracing::error!(id = %post.id_str, error = %err, "entity kind has no renderer, sending plain text");
                }
                media.extend(post.media_urls().into_iter().map(str::to_owned));
                escape_html(post.body()).into_owned()
            }
        }
    }
}

/// Remove repeated entries, keeping first occurrences in order.
fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
