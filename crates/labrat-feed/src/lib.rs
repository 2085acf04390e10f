//! Feed posts and relay message composition.
//!
//! Parses posts from the feed's JSON schema, converts their entity offsets
//! into byte-offset [`Span`](labrat_render::Span)s and composes chat
//! messages with repost and quote framing.
//!
//! # Offset units
//!
//! The feed owns its offset convention. Twitter's v1.1 `indices` count
//! Unicode code points, which is the default [`OffsetUnit`]. Offsets that do
//! not land on a character boundary in the chosen unit are rejected rather
//! than rounded.
//!
//! # Example
//!
//! ```
//! use labrat_feed::{Composer, Post};
//!
//! let post = Post::from_json(r#"{
//!     "id_str": "1",
//!     "text": "hi #rust",
//!     "user": { "screen_name": "rat" },
//!     "entities": { "hashtags": [{ "indices": [3, 8], "text": "rust" }] }
//! }"#).unwrap();
//!
//! let message = Composer::default().compose(&post);
//! assert!(message.text.starts_with(r#"hi <a href="https://twitter.com/hashtag/rust">#rust</a>"#));
//! ```

mod compose;
mod error;
mod offset;
mod post;
mod spans;

pub use compose::{Composer, ComposerOptions, DEFAULT_REPLY_LABEL, Message, ParseMode};
pub use error::FeedError;
pub use offset::{OffsetMap, OffsetUnit};
pub use post::{Entities, HashtagEntity, MediaEntity, MentionEntity, Post, UrlEntity, User};
pub use spans::post_spans;
