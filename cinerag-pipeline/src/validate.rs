//! Post-generation answer validation: hallucination scan and
//! low-confidence-language scan.

use cinerag_core::constants::{HALLUCINATION_FLAG_THRESHOLD, MIN_ANSWER_TOKENS};

/// Phrases that usually introduce a specific, checkable claim. Each one
/// present in the answer but absent from the context counts as a flag.
const HALLUCINATION_MARKERS: [&str; 8] = [
    "released in",
    "ra mắt năm",
    "won the",
    "đoạt giải",
    "academy award",
    "oscar",
    "box office",
    "golden globe",
];

/// Hedging phrases that mark an unusable grounded answer.
const HEDGING_PHRASES: [&str; 8] = [
    "i'm not sure",
    "i am not sure",
    "i don't know",
    "cannot determine",
    "tôi không chắc",
    "tôi không biết",
    "không có thông tin",
    "không rõ",
];

pub const DISCLAIMER: &str =
    "Lưu ý: một số chi tiết trong câu trả lời chưa được xác minh với dữ liệu phim.\n\n";

/// Count marker phrases present in the answer but unsupported by the
/// context.
pub fn hallucination_flags(answer: &str, context: &str) -> usize {
    let answer_lower = answer.to_lowercase();
    let context_lower = context.to_lowercase();
    HALLUCINATION_MARKERS
        .iter()
        .filter(|marker| answer_lower.contains(*marker) && !context_lower.contains(*marker))
        .count()
}

/// Prepend the verification disclaimer when enough unsupported markers
/// accumulate. Non-fatal; the answer is still returned.
pub fn apply_hallucination_check(answer: String, context: &str) -> (String, usize) {
    let flags = hallucination_flags(&answer, context);
    if flags >= HALLUCINATION_FLAG_THRESHOLD {
        (format!("{DISCLAIMER}{answer}"), flags)
    } else {
        (answer, flags)
    }
}

/// Whether the grounded answer is weak enough to re-route to fallback:
/// hedging language, or too short to be a real answer.
pub fn needs_fallback(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    if HEDGING_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return true;
    }
    answer.split_whitespace().count() < MIN_ANSWER_TOKENS
}
