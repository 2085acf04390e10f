//! Conversion of feed offsets to UTF-8 byte offsets.

use serde::Deserialize;

/// Unit a feed counts entity offsets in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetUnit {
    /// UTF-8 bytes, used as-is.
    Utf8,
    /// UTF-16 code units (JavaScript string indices).
    Utf16,
    /// Unicode scalar values. Twitter's v1.1 `indices` count these.
    #[default]
    CodePoint,
}

/// Lookup from feed offsets to byte offsets for one text.
///
/// Offsets that fall inside a character, such as the middle of a UTF-16
/// surrogate pair, have no byte offset.
#[derive(Debug)]
pub struct OffsetMap<'a> {
    text: &'a str,
    /// Byte offset for each unit offset, `None` inside a character.
    /// Empty for [`OffsetUnit::Utf8`].
    table: Vec<Option<usize>>,
}

impl<'a> OffsetMap<'a> {
    /// Build the lookup for `text` counted in `unit`.
    #[must_use]
    pub fn new(text: &'a str, unit: OffsetUnit) -> Self {
        let table = match unit {
            OffsetUnit::Utf8 => Vec::new(),
            OffsetUnit::CodePoint => text
                .char_indices()
                .map(|(byte, _)| Some(byte))
                .chain(std::iter::once(Some(text.len())))
                .collect(),
            OffsetUnit::Utf16 => {
                let mut table = Vec::with_capacity(text.len() + 1);
                for (byte, ch) in text.char_indices() {
                    table.push(Some(byte));
                    if ch.len_utf16() == 2 {
                        table.push(None);
                    }
                }
                table.push(Some(text.len()));
                table
            }
        };
        Self { text, table }
    }

    /// Length of the text in feed units.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.table.is_empty() {
            self.text.len()
        } else {
            self.table.len() - 1
        }
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset for feed offset `offset`.
    ///
    /// Returns `None` past the end of the text or inside a character.
    #[must_use]
    pub fn to_byte(&self, offset: usize) -> Option<usize> {
        if self.table.is_empty() {
            return self.text.is_char_boundary(offset).then_some(offset);
        }
        self.table.get(offset).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_identity_in_every_unit() {
        for unit in [OffsetUnit::Utf8, OffsetUnit::Utf16, OffsetUnit::CodePoint] {
            let map = OffsetMap::new("abc", unit);
            assert_eq!(map.len(), 3);
            assert_eq!(map.to_byte(0), Some(0));
            assert_eq!(map.to_byte(3), Some(3));
            assert_eq!(map.to_byte(4), None);
        }
    }

    #[test]
    fn test_code_points_cjk() {
        // Each CJK character is three bytes.
        let map = OffsetMap::new("猫と犬", OffsetUnit::CodePoint);
        assert_eq!(map.len(), 3);
        assert_eq!(map.to_byte(1), Some(3));
        assert_eq!(map.to_byte(3), Some(9));
    }

    #[test]
    fn test_code_points_emoji() {
        let map = OffsetMap::new("🐀 #rat", OffsetUnit::CodePoint);
        assert_eq!(map.len(), 6);
        assert_eq!(map.to_byte(2), Some(5));
        assert_eq!(map.to_byte(6), Some(9));
    }

    #[test]
    fn test_utf16_emoji_counts_two_units() {
        let map = OffsetMap::new("🐀 #rat", OffsetUnit::Utf16);
        assert_eq!(map.len(), 7);
        assert_eq!(map.to_byte(0), Some(0));
        assert_eq!(map.to_byte(1), None);
        assert_eq!(map.to_byte(2), Some(4));
        assert_eq!(map.to_byte(3), Some(5));
        assert_eq!(map.to_byte(7), Some(9));
    }

    #[test]
    fn test_utf16_bmp_counts_one_unit() {
        let map = OffsetMap::new("é#a", OffsetUnit::Utf16);
        assert_eq!(map.len(), 3);
        assert_eq!(map.to_byte(1), Some(2));
    }

    #[test]
    fn test_utf8_rejects_offset_inside_character() {
        let map = OffsetMap::new("é", OffsetUnit::Utf8);
        assert_eq!(map.to_byte(1), None);
        assert_eq!(map.to_byte(2), Some(2));
    }

    #[test]
    fn test_empty_text() {
        let map = OffsetMap::new("", OffsetUnit::CodePoint);
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.to_byte(0), Some(0));
    }

    #[test]
    fn test_deserialize_unit() {
        #[derive(Deserialize)]
        struct Wrapper {
            unit: OffsetUnit,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{"unit":"code-point"}"#).unwrap();
        assert_eq!(parsed.unit, OffsetUnit::CodePoint);
        let parsed: Wrapper = serde_json::from_str(r#"{"unit":"utf16"}"#).unwrap();
        assert_eq!(parsed.unit, OffsetUnit::Utf16);
    }
}
