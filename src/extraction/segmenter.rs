//! Splits plain text into sentence-like units.
//!
//! The boundary rule is Latin-centric: a unit ends after `.`, `!` or `?` when
//! the following whitespace is itself followed by an ASCII capital or digit.

use crate::subtitle_processor::normalize_whitespace;

/// Split a document into units.
///
/// Whitespace runs collapse to single spaces first, so every boundary gap is
/// exactly one space and units never carry leading or trailing whitespace.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let cleaned = normalize_whitespace(text);
    if cleaned.is_empty() {
        return Vec::new();
    }

    let chars: Vec<(usize, char)> = cleaned.char_indices().collect();
    let mut units = Vec::new();
    let mut unit_start = 0;

    for window in chars.windows(3) {
        let [(_, terminal), (space_at, space), (next_at, next)] = [window[0], window[1], window[2]];
        if matches!(terminal, '.' | '!' | '?')
            && space == ' '
            && (next.is_ascii_uppercase() || next.is_ascii_digit())
        {
            units.push(cleaned[unit_start..space_at].to_string());
            unit_start = next_at;
        }
    }
    units.push(cleaned[unit_start..].to_string());

    units
}
