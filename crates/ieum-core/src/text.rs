//! Character classification and char-offset slicing helpers.
//!
//! All cursor offsets in this crate are character offsets, not byte
//! offsets; these helpers keep the slicing in one place.

use unicode_width::UnicodeWidthChar;

/// Returns true for Hangul syllables and jamo.
pub fn is_hangul(c: char) -> bool {
    matches!(
        c,
        '\u{AC00}'..='\u{D7A3}' // syllables
        | '\u{1100}'..='\u{11FF}' // jamo
        | '\u{3130}'..='\u{318F}' // compatibility jamo
        | '\u{A960}'..='\u{A97F}' // jamo extended-A
        | '\u{D7B0}'..='\u{D7FF}' // jamo extended-B
    )
}

/// Word characters in the trigger-policy sense (ASCII alphanumerics
/// and underscore).
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Wrapping width of a glyph: Hangul counts as 2, everything else by
/// its Unicode display width (minimum 1, so control and zero-width
/// characters still make progress during line filling).
pub fn glyph_width(c: char) -> usize {
    if is_hangul(c) {
        2
    } else {
        UnicodeWidthChar::width(c).unwrap_or(1).max(1)
    }
}

/// Number of characters in a string.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the nth character, clamped to the string length.
pub fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Slice by character offsets, clamped to the string bounds.
pub fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let begin = byte_offset(s, start);
    let finish = byte_offset(s, end);
    &s[begin..finish]
}

/// Length of the trailing run of characters matching the predicate.
pub fn trailing_run(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.chars().rev().take_while(|&c| pred(c)).count()
}
