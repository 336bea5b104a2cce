//! Trigger policy: should a remote prediction fire at all?
//!
//! Pure decision function over the extracted context. The policy favors
//! precision over recall; a suppressed trigger costs nothing, a wasted
//! remote call does.

use crate::constants::{MAX_CONTEXT_CHARS, MAX_TRAILING_RUN, MIN_CONTEXT_CHARS, OPENING_CHARS};
use crate::context::PredictionContext;
use crate::text::{char_len, is_hangul, is_word_char, trailing_run};

/// Decide whether the given context warrants a prediction request.
///
/// Rules, in order; any failing rule suppresses prediction:
/// 1. At least [`MIN_CONTEXT_CHARS`] trimmed characters before the cursor.
/// 2. At most [`MAX_CONTEXT_CHARS`] characters before the cursor.
/// 3. The last character is not an unterminated opener.
/// 4. No trailing run of 3+ whitespace characters, and no trailing run
///    of 3+ characters that are neither word characters nor Hangul.
pub fn should_trigger(context: &PredictionContext) -> bool {
    let before = &context.text_before_cursor;

    if char_len(before.trim()) < MIN_CONTEXT_CHARS {
        return false;
    }
    if char_len(before) > MAX_CONTEXT_CHARS {
        return false;
    }

    let Some(last) = before.chars().last() else {
        return false;
    };
    if OPENING_CHARS.contains(&last) {
        return false;
    }

    if trailing_run(before, char::is_whitespace) >= MAX_TRAILING_RUN {
        return false;
    }
    let symbol_run = trailing_run(before, |c| {
        !c.is_whitespace() && !is_word_char(c) && !is_hangul(c)
    });
    if symbol_run >= MAX_TRAILING_RUN {
        return false;
    }

    true
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EditorSnapshot;

    fn context_for(before: &str) -> PredictionContext {
        let cursor = char_len(before);
        let snapshot = EditorSnapshot::with_caret_at(before.to_string(), cursor);
        crate::context::extract(&snapshot).unwrap()
    }

    #[test]
    fn triggers_on_ordinary_text() {
        assert!(should_trigger(&context_for("오늘 회의에서 논의한 내용은")));
        assert!(should_trigger(&context_for("The quick brown fox")));
    }

    #[test]
    fn too_short_context_suppresses() {
        // Trimmed length 3 fails regardless of other fields.
        assert!(!should_trigger(&context_for("안녕하")));
        assert!(!should_trigger(&context_for("  안녕하  ")));
        assert!(!should_trigger(&context_for("ab")));
    }

    #[test]
    fn minimum_length_boundary() {
        assert!(!should_trigger(&context_for("1234")));
        assert!(should_trigger(&context_for("12345")));
    }

    #[test]
    fn oversized_context_suppresses() {
        let long = "가".repeat(MAX_CONTEXT_CHARS + 1);
        assert!(!should_trigger(&context_for(&long)));

        let exactly = "가".repeat(MAX_CONTEXT_CHARS);
        assert!(should_trigger(&context_for(&exactly)));
    }

    #[test]
    fn trailing_opener_suppresses() {
        for opener in OPENING_CHARS {
            let before = format!("회의 내용 정리{opener}");
            assert!(!should_trigger(&context_for(&before)), "opener {opener:?}");
        }
    }

    #[test]
    fn trailing_whitespace_run_suppresses() {
        assert!(should_trigger(&context_for("문장을 쓰다가 ")));
        assert!(should_trigger(&context_for("문장을 쓰다가  ")));
        assert!(!should_trigger(&context_for("문장을 쓰다가   ")));
        assert!(!should_trigger(&context_for("문장을 쓰다가\n\n\n")));
    }

    #[test]
    fn trailing_symbol_run_suppresses() {
        assert!(should_trigger(&context_for("이렇게 하면 됩니다..")));
        assert!(!should_trigger(&context_for("이렇게 하면 됩니다...")));
        assert!(!should_trigger(&context_for("hello world !!!")));
    }

    #[test]
    fn hangul_and_word_chars_do_not_count_as_symbols() {
        assert!(should_trigger(&context_for("결론은 다음과 같다")));
        assert!(should_trigger(&context_for("version_2 released")));
    }

    #[test]
    fn closing_punctuation_is_fine() {
        assert!(should_trigger(&context_for("목록을 정리했다)")));
        assert!(should_trigger(&context_for("이제 다음 단계로,")));
    }
}
