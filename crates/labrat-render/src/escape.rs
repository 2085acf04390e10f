//! HTML escaping for chat markup.

use std::borrow::Cow;

/// Escape the characters Telegram's HTML parse mode treats as markup.
///
/// Replaces `&` with `&amp;`, `"` with `&quot;`, `<` with `&lt;` and `>` with
/// `&gt;`. The input is scanned once, so an entity emitted for one character
/// is never rescanned; this gives the same result as substituting `&` first
/// and the remaining characters afterwards.
///
/// Returns the input borrowed when it contains nothing to escape.
///
/// # Examples
///
/// ```
/// use labrat_render::escape_html;
///
/// assert_eq!(escape_html("5 < 10 & true"), "5 &lt; 10 &amp; true");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find(['&', '"', '<', '>']) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 16);
    out.push_str(&input[..first]);
    for ch in input[first..].chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_ampersand_not_doubled() {
        assert_eq!(escape_html("5 < 10 & true"), "5 &lt; 10 &amp; true");
    }

    #[test]
    fn test_escape_all_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_existing_entity_is_escaped_once() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_single_quote_untouched() {
        assert_eq!(escape_html("it's"), "it's");
    }

    #[test]
    fn test_escape_clean_input_is_borrowed() {
        assert!(matches!(escape_html("nothing here"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_non_ascii() {
        assert_eq!(escape_html("猫 & 🐀 <3"), "猫 &amp; 🐀 &lt;3");
    }

    #[test]
    fn test_escape_idempotent_on_clean_strings() {
        for s in ["", "hello", "émoji 🐀", "line\nbreak", "it's 100%"] {
            let once = escape_html(s);
            assert_eq!(escape_html(&once), once);
        }
    }
}
