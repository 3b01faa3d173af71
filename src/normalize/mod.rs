//! Text canonicalization for answer comparison.
//!
//! [`normalize`] is deterministic and idempotent: pictographs are replaced
//! with their registry name bracketed by spaces (so an emoji-only guess stays
//! a comparable token), whitespace is collapsed, and the result is lowercased.
//! It never fails; empty input yields an empty string.


use unicode_segmentation::UnicodeSegmentation;

/// Canonicalizes a string for comparison.
///
/// `"🍕"` becomes `"pizza"`, `"  Hello  World "` becomes `"hello world"`.
pub fn normalize(text: &str) -> String {
    let mut expanded = String::with_capacity(text.len());

    for grapheme in text.graphemes(true) {
        match emojis::get(grapheme) {
            Some(emoji) => {
                // Bracket with spaces so the name never fuses with
                // adjacent text ("🍕time" -> "pizza time").
                expanded.push(' ');
                expanded.push_str(emoji.name());
                expanded.push(' ');
            }
            None => expanded.push_str(grapheme),
        }
    }

    let collapsed: Vec<&str> = expanded.split_whitespace().collect();
    collapsed.join(" ").to_lowercase()
}

/// Returns `true` if the raw (pre-normalization) text contains any
/// pictographic symbol known to the emoji registry.
pub fn contains_pictograph(text: &str) -> bool {
    text.graphemes(true).any(|g| emojis::get(g).is_some())
}
