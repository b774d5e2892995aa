use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One fragment of a multi-part model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl ResponsePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// The value returned by a text-generation call, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawModelResponse {
    /// Response object exposing its text directly
    Text { text: String },
    /// The response is itself a plain string
    Plain(String),
    /// Response split into parts, each of which may carry text
    Parts(Vec<ResponsePart>),
    /// Anything else, kept for diagnostics
    Other(Value),
}

impl RawModelResponse {
    /// Classify a wire value. Checked in order: a `text` accessor, a bare
    /// string, a `parts` array, then Gemini's `candidates[0].content.parts`.
    pub fn from_value(value: Value) -> Self {
        if let Some(text) = value.get("text").and_then(Value::as_str) {
            return RawModelResponse::Text {
                text: text.to_string(),
            };
        }

        if let Value::String(text) = value {
            return RawModelResponse::Plain(text);
        }

        if let Some(parts) = parts_of(value.get("parts")) {
            return RawModelResponse::Parts(parts);
        }

        let candidate_parts = value
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"));
        if let Some(parts) = parts_of(candidate_parts) {
            return RawModelResponse::Parts(parts);
        }

        RawModelResponse::Other(value)
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            RawModelResponse::Text { .. } => "text",
            RawModelResponse::Plain(_) => "plain",
            RawModelResponse::Parts(_) => "parts",
            RawModelResponse::Other(_) => "other",
        }
    }
}

impl From<String> for RawModelResponse {
    fn from(text: String) -> Self {
        RawModelResponse::Plain(text)
    }
}

impl From<&str> for RawModelResponse {
    fn from(text: &str) -> Self {
        RawModelResponse::Plain(text.to_string())
    }
}

fn parts_of(value: Option<&Value>) -> Option<Vec<ResponsePart>> {
    let parts = value?.as_array()?;
    if parts.is_empty() {
        return None;
    }
    Some(
        parts
            .iter()
            .map(|part| ResponsePart {
                text: part.get("text").and_then(Value::as_str).map(str::to_string),
            })
            .collect(),
    )
}
