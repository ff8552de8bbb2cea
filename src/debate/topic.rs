//! Topic sanitisation before a topic is interpolated into prompts

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest topic accepted, in characters
pub const MAX_TOPIC_CHARS: usize = 200;

static DISALLOWED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,?!\-:]").expect("topic pattern"));

/// Keep word characters, whitespace and `.,?!-:`; cap at 200 characters; trim
pub fn sanitize_topic(topic: &str) -> String {
    let cleaned = DISALLOWED_PATTERN.replace_all(topic, "");
    let truncated: String = cleaned.chars().take(MAX_TOPIC_CHARS).collect();
    truncated.trim().to_string()
}
