//! Post-processing of raw model output.
//!
//! Remote predictions arrive as free-form text: they frequently echo
//! the trailing input, stop mid-word, or leave a bracket or quote
//! hanging. This module strips the echo and truncates obviously broken
//! trailing constructs. Best-effort repair only; it removes garbage, it
//! does not guarantee grammatical completeness.

use crate::constants::MIN_TOKEN_CHARS;
use crate::context::PredictionContext;
use crate::text::is_hangul;

/// Bracket and quote pairs checked for balance. Symmetric pairs (the
/// quotes) are matched by parity.
const PAIRS: [(char, char); 6] = [
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('"', '"'),
    ('\'', '\''),
    ('`', '`'),
];

/// Clean a raw prediction against the current context.
///
/// Steps: trim, strip the overlap with already-typed text, truncate
/// unbalanced brackets/quotes, drop a truncated trailing word fragment.
/// Returns an empty string when nothing meaningful remains.
pub fn process(raw: &str, context: &PredictionContext) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let stripped = strip_overlap(trimmed, &context.text_before_cursor);
    let balanced = truncate_unbalanced(&stripped);
    let cleaned = drop_trailing_fragment(&balanced);
    cleaned.trim_end().to_string()
}

/// Remove the longest case-insensitive overlap between the suffix of
/// `before` and the prefix of `prediction`.
///
/// Models tend to re-emit the last few typed characters; stripping the
/// overlap keeps the suggestion a pure continuation. Stripping repeats
/// until no overlap remains, which makes the operation idempotent.
pub fn strip_overlap(prediction: &str, before: &str) -> String {
    let before_chars: Vec<char> = before.chars().collect();
    let mut pred: Vec<char> = prediction.chars().collect();

    loop {
        let max_k = before_chars.len().min(pred.len());

        let mut stripped = 0;
        for k in (1..=max_k).rev() {
            let suffix: String = before_chars[before_chars.len() - k..].iter().collect();
            let prefix: String = pred[..k].iter().collect();
            // Full lowercase expansions; some characters lowercase to
            // more than one char and must not match a bare prefix.
            if suffix.to_lowercase() == prefix.to_lowercase() {
                stripped = k;
                break;
            }
        }
        if stripped == 0 {
            break;
        }
        pred.drain(..stripped);
    }

    pred.into_iter().collect()
}

/// Truncate at unmatched openers until no pair has more openers than
/// closers.
///
/// A prediction cut off mid-parenthetical reads as broken; dropping
/// from the unmatched opener to the end is the least surprising repair.
pub fn truncate_unbalanced(text: &str) -> String {
    let mut out: Vec<char> = text.chars().collect();

    loop {
        let mut truncated = false;

        for (open, close) in PAIRS {
            let cut = if open == close {
                // Symmetric pair: an odd count means the last
                // occurrence opened and never closed.
                let count = out.iter().filter(|&&c| c == open).count();
                if count % 2 == 1 {
                    out.iter().rposition(|&c| c == open)
                } else {
                    None
                }
            } else {
                last_unmatched_opener(&out, open, close)
            };

            if let Some(pos) = cut {
                out.truncate(pos);
                truncated = true;
            }
        }

        if !truncated {
            break;
        }
    }

    out.into_iter().collect()
}

/// Position of the last unmatched opener, scanning with a stack.
fn last_unmatched_opener(chars: &[char], open: char, close: char) -> Option<usize> {
    let mut stack: Vec<usize> = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == open {
            stack.push(i);
        } else if c == close {
            stack.pop();
        }
    }
    stack.last().copied()
}

/// Drop a truncated trailing word fragment.
///
/// When the text does not end in whitespace and its last token is
/// shorter than [`MIN_TOKEN_CHARS`] or carries no Hangul/Latin letters,
/// the token is treated as a cut-off word and removed.
fn drop_trailing_fragment(text: &str) -> String {
    if text.is_empty() || text.ends_with(char::is_whitespace) {
        return text.to_string();
    }

    let token_start = text
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let token = &text[token_start..];

    let too_short = token.chars().count() < MIN_TOKEN_CHARS;
    let no_letters = !token
        .chars()
        .any(|c| is_hangul(c) || c.is_ascii_alphabetic());

    if too_short || no_letters {
        text[..token_start].to_string()
    } else {
        text.to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EditorSnapshot;
    use crate::text::char_len;
    use proptest::prelude::*;

    fn context_for(before: &str) -> PredictionContext {
        let cursor = char_len(before);
        let snapshot = EditorSnapshot::with_caret_at(before.to_string(), cursor);
        crate::context::extract(&snapshot).unwrap()
    }

    #[test]
    fn unmatched_paren_truncates() {
        let ctx = context_for("보고서를 작성");
        let out = process("하고 있습니다 (계속", &ctx);
        assert_eq!(out, "하고 있습니다");
    }

    #[test]
    fn overlap_with_typed_text_is_stripped() {
        let ctx = context_for("안녕하");
        let out = process("하세요", &ctx);
        assert_eq!(out, "세요");
    }

    #[test]
    fn overlap_strip_is_case_insensitive() {
        let ctx = context_for("I like RU");
        let out = process("rust programs", &ctx);
        // "RU" suffix matches "ru" prefix; the rest of the word remains.
        assert_eq!(out, "st programs");
    }

    #[test]
    fn multi_char_case_folds_compare_fully() {
        // U+0130 lowercases to "i" plus a combining dot; a bare "i"
        // prefix is not an overlap with it.
        let out = strip_overlap("istanbul", "merhaba İ");
        assert_eq!(out, "istanbul");
    }

    #[test]
    fn no_overlap_leaves_prediction_intact() {
        let ctx = context_for("오늘 점심은");
        let out = process("김치찌개가 좋겠습니다", &ctx);
        assert_eq!(out, "김치찌개가 좋겠습니다");
    }

    #[test]
    fn balanced_brackets_untouched() {
        let ctx = context_for("다음 항목을 참고");
        let out = process("하세요 (첫째, 둘째)", &ctx);
        assert_eq!(out, "하세요 (첫째, 둘째)");
    }

    #[test]
    fn odd_quote_truncates_at_quote() {
        let ctx = context_for("그는 이렇게 말했다");
        let out = process("고 한다 \"아직", &ctx);
        assert_eq!(out, "고 한다");
    }

    #[test]
    fn nested_unmatched_openers_all_removed() {
        let out = truncate_unbalanced("a ((b");
        assert_eq!(out, "a ");
    }

    #[test]
    fn extra_closers_are_tolerated() {
        // Only surplus openers are repaired.
        let out = truncate_unbalanced("a) b]");
        assert_eq!(out, "a) b]");
    }

    #[test]
    fn short_trailing_fragment_dropped() {
        let ctx = context_for("요약하면 다음과");
        let out = process("같습니다 그", &ctx);
        assert_eq!(out, "같습니다");
    }

    #[test]
    fn letterless_trailing_token_dropped() {
        let ctx = context_for("합계는 다음과 같다");
        let out = process("총 1500", &ctx);
        assert_eq!(out, "총");
    }

    #[test]
    fn healthy_trailing_word_kept() {
        let ctx = context_for("내일 아침에");
        let out = process("다시 확인하겠습니다", &ctx);
        assert_eq!(out, "다시 확인하겠습니다");
    }

    #[test]
    fn whitespace_only_prediction_is_empty() {
        let ctx = context_for("아무 내용이나");
        assert_eq!(process("   \n  ", &ctx), "");
    }

    #[test]
    fn full_echo_collapses_to_empty() {
        let ctx = context_for("안녕하세요");
        assert_eq!(process("안녕하세요", &ctx), "");
    }

    proptest! {
        // Idempotence: stripping overlap twice is a no-op.
        #[test]
        fn overlap_strip_idempotent(before in "\\PC{0,20}", pred in "\\PC{0,20}") {
            let once = strip_overlap(&pred, &before);
            let twice = strip_overlap(&once, &before);
            prop_assert_eq!(once, twice);
        }

        // Bracket-balance invariant: output never has more openers than
        // closers for any pair.
        #[test]
        fn output_never_opener_heavy(text in "[a-z가-힣 ()\\[\\]{}\"'`]{0,40}") {
            let out = truncate_unbalanced(&text);
            for (open, close) in PAIRS {
                let opens = out.chars().filter(|&c| c == open).count();
                let closes = out.chars().filter(|&c| c == close).count();
                if open == close {
                    prop_assert_eq!(opens % 2, 0);
                } else {
                    prop_assert!(opens <= closes);
                }
            }
        }

        // Repair never invents characters: the result is always a
        // subsequence-by-truncation of the trimmed input.
        #[test]
        fn process_never_adds_text(before in "[a-z가-힣 ]{5,20}", pred in "[a-z가-힣 ]{0,30}") {
            let ctx = context_for(&before);
            let out = process(&pred, &ctx);
            prop_assert!(out.chars().count() <= pred.trim().chars().count());
        }
    }
}
