//! Error types for debate orchestration
//!
//! Module-level errors (`ConfigError`, `LlmError`) convert into the top-level
//! `DebateError` so callers can propagate with `?` end to end.

use crate::llm::provider::LlmError;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Main error type for debate operations
#[derive(Debug, Error)]
pub enum DebateError {
    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DebateError {
    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Error text safe to print or persist in result files
    pub fn sanitized(&self) -> String {
        sanitize_error_message(&self.to_string())
    }
}

/// Result type for debate operations
pub type DebateResult<T> = Result<T, DebateError>;

const MAX_ERROR_MESSAGE_LEN: usize = 500;
const TRUNCATE_SUFFIX: &str = "...[truncated]";

static SECRET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(password|token|key|secret)[=:]\s*[^\s,;]+|bearer\s+[^\s,;]+")
        .expect("secret pattern is valid")
});

/// Paths under credential directories
static SECRET_PATH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-zA-Z0-9._/-]+/(secrets?|\.ssh|\.aws|\.config)/[a-zA-Z0-9._/-]+")
        .expect("secret path pattern is valid")
});

/// Redact credentials and credential paths, and cap the length of an error message
pub fn sanitize_error_message(message: &str) -> String {
    let redacted = SECRET_PATTERN.replace_all(message, |caps: &regex::Captures| match caps.get(1) {
        Some(name) => format!("{}=***", name.as_str()),
        None => "Bearer ***".to_string(),
    });
    let mut sanitized = SECRET_PATH_PATTERN
        .replace_all(&redacted, "/***REDACTED***/")
        .to_string();

    if sanitized.len() > MAX_ERROR_MESSAGE_LEN {
        let mut cut = MAX_ERROR_MESSAGE_LEN - TRUNCATE_SUFFIX.len();
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str(TRUNCATE_SUFFIX);
    }

    sanitized
}
