use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on upstream error text carried into an [`ErrorRecord`].
const MAX_UPSTREAM_MESSAGE_CHARS: usize = 300;

/// Main error type for the planner core
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Google API key is missing. Provide one with --api-key or GOOGLE_API_KEY.")]
    MissingCredential,

    #[error("No model selected. Choose a Gemini model before generating.")]
    MissingSelection,

    #[error("Unrecognized response shape from the model: {dump}")]
    UnrecognizedResponseShape { dump: String },

    #[error("Failed to parse the model response as JSON: {message}")]
    MalformedJson {
        message: String,
        position: Option<ParsePosition>,
        excerpt: String,
    },

    #[error("Response does not match the `{schema}` schema: {details}")]
    SchemaMismatch { schema: String, details: String },

    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Upstream quota exceeded: {message}")]
    QuotaExceeded {
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Coarse failure taxonomy surfaced to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    MissingCredential,
    MissingSelection,
    UnrecognizedResponseShape,
    MalformedJson,
    UpstreamFailure,
    /// Upstream failure caused by quota or rate limiting.
    QuotaExceeded,
}

impl ErrorKind {
    pub fn is_upstream(self) -> bool {
        matches!(self, ErrorKind::UpstreamFailure | ErrorKind::QuotaExceeded)
    }
}

/// Location of a JSON parse failure inside the cleaned response text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsePosition {
    /// 1-based line reported by the parser
    pub line: usize,
    /// 1-based column reported by the parser
    pub column: usize,
    /// Byte offset into the parsed text
    pub offset: usize,
}

/// Structured failure value handed to the rendering layer in place of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    /// Human-readable message, serialized under `error` so renderers can key on it
    #[serde(rename = "error")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ParsePosition>,
    /// Trying the same request again later may succeed
    #[serde(default)]
    pub retryable: bool,
}

impl ErrorRecord {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            excerpt: None,
            position: None,
            retryable: false,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_position(mut self, position: Option<ParsePosition>) -> Self {
        self.position = position;
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

impl PlannerError {
    /// Classify a failure message coming back from the text-generation service.
    pub fn from_upstream_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if looks_like_quota_failure(&message) {
            PlannerError::QuotaExceeded {
                message,
                retry_after: None,
            }
        } else {
            PlannerError::Upstream(message)
        }
    }

    /// Whether the same request may succeed if the user tries again later.
    /// Nothing in the crate retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlannerError::Upstream(_) | PlannerError::QuotaExceeded { .. }
        )
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PlannerError::MissingCredential => ErrorKind::MissingCredential,
            PlannerError::MissingSelection => ErrorKind::MissingSelection,
            PlannerError::UnrecognizedResponseShape { .. } => {
                ErrorKind::UnrecognizedResponseShape
            }
            PlannerError::MalformedJson { .. }
            | PlannerError::SchemaMismatch { .. }
            | PlannerError::Validation(_) => ErrorKind::MalformedJson,
            PlannerError::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            PlannerError::Config(_) | PlannerError::Upstream(_) => ErrorKind::UpstreamFailure,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::MissingCredential => "MISSING_CREDENTIAL",
            PlannerError::MissingSelection => "MISSING_SELECTION",
            PlannerError::UnrecognizedResponseShape { .. } => "UNRECOGNIZED_RESPONSE_SHAPE",
            PlannerError::MalformedJson { .. } => "MALFORMED_JSON",
            PlannerError::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            PlannerError::Upstream(_) => "UPSTREAM_FAILURE",
            PlannerError::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Convert into the record the rendering layer displays.
    pub fn to_error_record(&self) -> ErrorRecord {
        let record = match self {
            PlannerError::MalformedJson {
                position, excerpt, ..
            } => ErrorRecord::new(self.kind(), self.to_string())
                .with_excerpt(excerpt.clone())
                .with_position(*position),
            PlannerError::UnrecognizedResponseShape { dump } => ErrorRecord::new(
                self.kind(),
                "The model returned a response in an unexpected format.",
            )
            .with_detail(dump.clone()),
            PlannerError::QuotaExceeded {
                message,
                retry_after,
            } => {
                let guidance = match retry_after {
                    Some(secs) => format!(
                        "The API quota or rate limit was reached. Wait about {secs}s, or switch to another model, then try again."
                    ),
                    None => "The API quota or rate limit was reached. Wait a moment, check your plan's limits, or switch to another model, then try again.".to_string(),
                };
                ErrorRecord::new(self.kind(), guidance).with_detail(truncate_chars(
                    message,
                    MAX_UPSTREAM_MESSAGE_CHARS,
                ))
            }
            PlannerError::Upstream(message) => ErrorRecord::new(
                self.kind(),
                format!(
                    "An error occurred while generating: {}",
                    truncate_chars(message, MAX_UPSTREAM_MESSAGE_CHARS)
                ),
            ),
            _ => ErrorRecord::new(self.kind(), self.to_string()),
        };
        record.with_retryable(self.is_retryable())
    }
}

fn looks_like_quota_failure(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["quota", "rate limit", "rate-limit", "resource_exhausted", "429"]
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Truncate to at most `max` characters, marking the cut with an ellipsis.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_messages_are_classified() {
        let err = PlannerError::from_upstream_message("429 Resource has been exhausted (e.g. check quota).");
        assert!(matches!(err, PlannerError::QuotaExceeded { .. }));
        assert_eq!(err.kind(), ErrorKind::QuotaExceeded);
        assert!(err.kind().is_upstream());

        let err = PlannerError::from_upstream_message("connection reset by peer");
        assert!(matches!(err, PlannerError::Upstream(_)));
        assert_eq!(err.kind(), ErrorKind::UpstreamFailure);
    }

    #[test]
    fn upstream_record_truncates_long_messages() {
        let long = "x".repeat(1000);
        let record = PlannerError::Upstream(long).to_error_record();
        assert!(record.message.ends_with("..."));
        assert!(record.message.chars().count() < 400);
    }

    #[test]
    fn quota_record_carries_guidance_distinct_from_generic_failure() {
        let quota = PlannerError::QuotaExceeded {
            message: "RESOURCE_EXHAUSTED".to_string(),
            retry_after: Some(30),
        }
        .to_error_record();
        let generic = PlannerError::Upstream("boom".to_string()).to_error_record();

        assert!(quota.message.contains("30s"));
        assert_eq!(quota.detail.as_deref(), Some("RESOURCE_EXHAUSTED"));
        assert_ne!(quota.message, generic.message);
    }

    #[test]
    fn record_serializes_message_under_error_key() {
        let record = PlannerError::MissingCredential.to_error_record();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["kind"], "MISSING_CREDENTIAL");
        assert!(value["error"].as_str().unwrap().contains("API key"));
        assert!(value.get("excerpt").is_none());
    }

    #[test]
    fn only_upstream_failures_are_marked_retryable() {
        assert!(PlannerError::Upstream("503".to_string()).to_error_record().retryable);
        assert!(PlannerError::from_upstream_message("quota exceeded")
            .to_error_record()
            .retryable);

        let malformed = PlannerError::MalformedJson {
            message: "expected value".to_string(),
            position: None,
            excerpt: "oops".to_string(),
        };
        assert!(!malformed.to_error_record().retryable);
        assert!(!PlannerError::MissingCredential.to_error_record().retryable);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("💖💖💖", 2), "💖💖...");
        assert_eq!(truncate_chars("short", 10), "short");
    }
}
