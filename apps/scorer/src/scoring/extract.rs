//! Lenient parsing of free-form model answers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Integer or decimal literal: optional leading digits, optional point, at least one digit.
/// No sign is matched, so extracted values are never negative.
pub const NUMBER_PATTERN: &str = r"\d*\.?\d+";

/// Lower-cased substrings that mark a yes/no answer as affirmative.
/// Matched anywhere in the answer: "not true" still counts.
pub const AFFIRMATIVE_TOKENS: &[&str] = &["true", "yes"];

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(NUMBER_PATTERN).expect("number regex"));

/// First numeric literal in `text`, if any.
pub fn find_number(text: &str) -> Option<f64> {
    NUMBER_RE
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// First numeric literal in `text`, or 0.0 when there is none.
pub fn extract_number(text: &str) -> f64 {
    find_number(text).unwrap_or(0.0)
}

/// True if any affirmative token occurs in the lower-cased answer.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.to_lowercase();
    AFFIRMATIVE_TOKENS.iter().any(|t| answer.contains(t))
}
