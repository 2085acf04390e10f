//! Conversion of post entities into render spans.

use labrat_render::{RenderError, Span, SpanPayload};

use crate::offset::{OffsetMap, OffsetUnit};
use crate::post::Post;

/// Build byte-offset spans for every entity of `post`.
///
/// Entity `indices` are read in `unit` and converted against the post body.
/// Links render their expanded URL and display form, falling back to the
/// shortened URL when the feed omits them.
///
/// # Errors
///
/// Returns [`RenderError::InvalidSpan`] when an entity's indices are past the
/// end of the text or fall inside a character.
pub fn post_spans(post: &Post, unit: OffsetUnit) -> Result<Vec<Span>, RenderError> {
    let text = post.body();
    let map = OffsetMap::new(text, unit);
    let entities = &post.entities;

    let mut spans = Vec::with_capacity(
        entities.urls.len()
            + entities.user_mentions.len()
            + entities.hashtags.len()
            + entities.media.len(),
    );

    for url in &entities.urls {
        let target = url.expanded_url.as_deref().unwrap_or(&url.url);
        let display = url.display_url.as_deref().unwrap_or(&url.url);
        spans.push(span_at(
            &map,
            url.indices,
            SpanPayload::Link {
                url: target.to_owned(),
                display: display.to_owned(),
            },
        )?);
    }
    for mention in &entities.user_mentions {
        spans.push(span_at(
            &map,
            mention.indices,
            SpanPayload::Mention {
                handle: mention.screen_name.clone(),
            },
        )?);
    }
    for hashtag in &entities.hashtags {
        spans.push(span_at(
            &map,
            hashtag.indices,
            SpanPayload::Hashtag {
                tag: hashtag.text.clone(),
            },
        )?);
    }
    for media in &entities.media {
        spans.push(span_at(
            &map,
            media.indices,
            SpanPayload::Media {
                url: media.media_url_https.clone(),
            },
        )?);
    }

    Ok(spans)
}

fn span_at(map: &OffsetMap<'_>, [start, end]: [usize; 2], payload: SpanPayload) -> Result<Span, RenderError> {
    let invalid = |reason| RenderError::InvalidSpan {
        start,
        end,
        len: map.len(),
        reason,
    };

    if start > map.len() || end > map.len() {
        return Err(invalid("entity indices are past the end of the text"));
    }
    let start_byte = map
        .to_byte(start)
        .ok_or_else(|| invalid("entity start splits a character"))?;
    let end_byte = map
        .to_byte(end)
        .ok_or_else(|| invalid("entity end splits a character"))?;

    Ok(Span::new(start_byte, end_byte, payload))
}
