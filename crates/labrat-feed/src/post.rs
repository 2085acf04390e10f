//! Feed post schema.
//!
//! Mirrors the subset of Twitter's v1.1 status object the relay reads.
//! Unknown fields are ignored.

use serde::Deserialize;

use crate::error::FeedError;

/// A post from the feed.
#[derive(Clone, Debug, Deserialize)]
pub struct Post {
    /// Post id as a string.
    pub id_str: String,
    /// Text in compatibility mode (may be truncated).
    #[serde(default)]
    text: Option<String>,
    /// Text in extended mode.
    #[serde(default)]
    full_text: Option<String>,
    /// Whether `text` was cut short and ends with a permalink.
    #[serde(default)]
    pub truncated: bool,
    /// Author.
    pub user: User,
    /// Entities annotating the text.
    #[serde(default)]
    pub entities: Entities,
    /// Whether this post quotes another one.
    #[serde(default)]
    pub is_quote_status: bool,
    /// Quoted post, when still available.
    #[serde(default)]
    pub quoted_status: Option<Box<Post>>,
    /// Original post, when this is a repost.
    #[serde(default)]
    pub retweeted_status: Option<Box<Post>>,
    /// Account being replied to, if any.
    #[serde(default)]
    pub in_reply_to_user_id_str: Option<String>,
}

impl Post {
    /// Parse a post from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Json`] if the input is not a valid post.
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Post text, preferring the extended form.
    #[must_use]
    pub fn body(&self) -> &str {
        self.full_text
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or_default()
    }

    /// Whether the quoted post is available to append.
    ///
    /// A post flagged `is_quote_status` whose quoted post was withheld does
    /// not count: its trailing permalink is the only reference left.
    #[must_use]
    pub fn is_quoting(&self) -> bool {
        self.quoted_status.is_some()
    }

    /// Whether this post is a reply to another account.
    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.in_reply_to_user_id_str.is_some()
    }

    /// URLs of all media entities, in document order.
    pub fn media_urls(&self) -> Vec<&str> {
        let mut media: Vec<&MediaEntity> = self.entities.media.iter().collect();
        media.sort_by_key(|m| m.indices[0]);
        media.iter().map(|m| m.media_url_https.as_str()).collect()
    }
}

/// Post author.
#[derive(Clone, Debug, Deserialize)]
pub struct User {
    /// Handle without `@`.
    pub screen_name: String,
}

/// Entities annotating a post's text.
///
/// `indices` are `[start, end)` in the feed's offset unit.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Entities {
    /// Shortened links.
    pub urls: Vec<UrlEntity>,
    /// Account mentions.
    pub user_mentions: Vec<MentionEntity>,
    /// Hashtags.
    pub hashtags: Vec<HashtagEntity>,
    /// Attached media.
    pub media: Vec<MediaEntity>,
}

/// Shortened link.
#[derive(Clone, Debug, Deserialize)]
pub struct UrlEntity {
    /// Range in the text.
    pub indices: [usize; 2],
    /// Shortened URL as it appears in the text.
    pub url: String,
    /// Full target URL.
    #[serde(default)]
    pub expanded_url: Option<String>,
    /// Human readable form of the target.
    #[serde(default)]
    pub display_url: Option<String>,
}

/// Account mention.
#[derive(Clone, Debug, Deserialize)]
pub struct MentionEntity {
    /// Range in the text.
    pub indices: [usize; 2],
    /// Mentioned handle without `@`.
    pub screen_name: String,
}

/// Hashtag.
#[derive(Clone, Debug, Deserialize)]
pub struct HashtagEntity {
    /// Range in the text.
    pub indices: [usize; 2],
    /// Tag without `#`.
    pub text: String,
}

/// Attached media.
#[derive(Clone, Debug, Deserialize)]
pub struct MediaEntity {
    /// Range in the text.
    pub indices: [usize; 2],
    /// Direct HTTPS URL of the media file.
    pub media_url_https: String,
}
