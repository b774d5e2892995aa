use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{truncate_chars, ParsePosition, PlannerError, Result},
    schemas::{CompletionSchema, Validator},
    types::{
        DatePlan, ItineraryPlan, ItineraryResult, PlanResult, RawModelResponse, StructuredPayload,
    },
};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";
/// Characters kept on each side of a parse failure in the excerpt.
const EXCERPT_RADIUS: usize = 100;
/// Characters kept when the parser reports no position.
const EXCERPT_HEAD: usize = 500;
const DUMP_LIMIT: usize = 500;

/// Pull plain text out of a model response.
pub fn extract_text(raw: &RawModelResponse) -> Result<String> {
    match raw {
        RawModelResponse::Text { text } => Ok(text.clone()),
        RawModelResponse::Plain(text) => Ok(text.clone()),
        RawModelResponse::Parts(parts) if !parts.is_empty() => Ok(parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect()),
        other => Err(PlannerError::UnrecognizedResponseShape {
            dump: truncate_chars(&format!("{:?}", other), DUMP_LIMIT),
        }),
    }
}

/// Remove a Markdown code fence wrapped around a JSON payload.
///
/// Text without fences comes back trimmed and otherwise unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix(JSON_FENCE) {
        cleaned = rest.trim();
    } else if let Some(rest) = cleaned.strip_prefix(FENCE) {
        cleaned = rest.trim();
    }
    if let Some(rest) = cleaned.strip_suffix(FENCE) {
        cleaned = rest.trim();
    }
    cleaned
}

/// Parse cleaned text, attaching position and excerpt diagnostics on failure.
pub fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|err| {
        let position = (err.line() > 0).then(|| ParsePosition {
            line: err.line(),
            column: err.column(),
            offset: byte_offset(text, err.line(), err.column()),
        });
        let excerpt = match position {
            Some(position) => excerpt_around(text, position.offset, EXCERPT_RADIUS),
            None => truncate_chars(text, EXCERPT_HEAD),
        };

        PlannerError::MalformedJson {
            message: err.to_string(),
            position,
            excerpt,
        }
    })
}

/// Schema-agnostic normalization: extract, strip fences, parse.
pub fn normalize_json(raw: &RawModelResponse) -> Result<Value> {
    let text = extract_text(raw)?;
    let cleaned = strip_code_fence(&text);
    debug!(
        target: "dateplan::normalize",
        shape = raw.shape_name(),
        raw_chars = text.len(),
        cleaned_chars = cleaned.len(),
        "normalizing model response"
    );
    parse_json(cleaned)
}

/// Normalize a plan response, accepting any valid JSON.
pub fn normalize(raw: &RawModelResponse) -> PlanResult {
    normalize_plan_with(raw, Validator::Permissive)
}

pub fn normalize_plan_with(raw: &RawModelResponse, validator: Validator) -> PlanResult {
    match normalize_checked::<DatePlan>(raw, validator) {
        Ok(payload) => PlanResult::Plan(payload),
        Err(err) => PlanResult::from_error(&err),
    }
}

/// Normalize an itinerary response, accepting any valid JSON.
pub fn normalize_itinerary(raw: &RawModelResponse) -> ItineraryResult {
    normalize_itinerary_with(raw, Validator::Permissive)
}

pub fn normalize_itinerary_with(raw: &RawModelResponse, validator: Validator) -> ItineraryResult {
    match normalize_checked::<ItineraryPlan>(raw, validator) {
        Ok(payload) => ItineraryResult::Itinerary(payload),
        Err(err) => ItineraryResult::from_error(&err),
    }
}

fn normalize_checked<T: CompletionSchema>(
    raw: &RawModelResponse,
    validator: Validator,
) -> Result<StructuredPayload> {
    let result = normalize_json(raw).and_then(|value| {
        validator.check(T::schema(), &value)?;
        Ok(StructuredPayload::for_schema::<T>(value))
    });

    if let Err(err) = &result {
        warn!(
            target: "dateplan::normalize",
            schema = T::schema().schema_name(),
            code = err.error_code(),
            error = %err,
            "model response rejected"
        );
    }
    result
}

/// Convert the parser's 1-based line and column into a byte offset.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

fn excerpt_around(text: &str, offset: usize, radius: usize) -> String {
    let mut start = offset.min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let end_anchor = start;

    for _ in 0..radius {
        match text[..start].char_indices().next_back() {
            Some((idx, _)) => start = idx,
            None => break,
        }
    }

    let end = text[end_anchor..]
        .char_indices()
        .nth(radius)
        .map(|(idx, _)| end_anchor + idx)
        .unwrap_or(text.len());

    text[start..end].to_string()
}
