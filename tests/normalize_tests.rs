use date_night_planner::{
    normalize, normalize_itinerary,
    services::normalizer::{normalize_plan_with, strip_code_fence},
    ErrorKind, PlanResult, RawModelResponse, ResponsePart, Validator,
};
use serde_json::json;

#[test]
fn test_fenced_plan_is_parsed() {
    let raw = RawModelResponse::from("```json\n{\"title\": \"X\"}\n```");

    let plan = normalize(&raw).plan().unwrap();
    assert_eq!(plan.title.as_deref(), Some("X"));
}

#[test]
fn test_bare_fence_and_surrounding_whitespace() {
    let raw = RawModelResponse::from("  \n```\n{\"title\": \"Bare\"}\n```  \n");

    let result = normalize(&raw);
    assert_eq!(result.payload().unwrap().value(), &json!({ "title": "Bare" }));
}

#[test]
fn test_non_json_text_is_malformed_with_excerpt() {
    let raw = RawModelResponse::from("not json at all");

    let record = normalize(&raw).error().cloned().unwrap();
    assert_eq!(record.kind, ErrorKind::MalformedJson);
    assert!(record.excerpt.unwrap().contains("not json"));
    assert_eq!(record.position.unwrap().line, 1);
}

#[test]
fn test_parts_are_concatenated_in_order() {
    let raw = RawModelResponse::Parts(vec![
        ResponsePart::text("{\"a\":"),
        ResponsePart::text("1,\"b\":2}"),
    ]);

    let result = normalize(&raw);
    assert_eq!(result.payload().unwrap().value(), &json!({ "a": 1, "b": 2 }));
}

#[test]
fn test_candidates_envelope_is_unwrapped() {
    let raw = RawModelResponse::from_value(json!({
        "candidates": [{
            "content": { "parts": [{ "text": "{\"title\":" }, { "text": "\"Stargazing\"}" }] }
        }]
    }));

    let plan = normalize(&raw).plan().unwrap();
    assert_eq!(plan.title.as_deref(), Some("Stargazing"));
}

#[test]
fn test_unrecognized_shape() {
    let raw = RawModelResponse::from_value(json!({ "foo": 42 }));

    let record = normalize(&raw).error().cloned().unwrap();
    assert_eq!(record.kind, ErrorKind::UnrecognizedResponseShape);
    assert!(record.detail.unwrap().contains("foo"));
}

#[test]
fn test_empty_parts_are_unrecognized() {
    let raw = RawModelResponse::Parts(Vec::new());

    let record = normalize(&raw).error().cloned().unwrap();
    assert_eq!(record.kind, ErrorKind::UnrecognizedResponseShape);
}

#[test]
fn test_success_is_identical_to_direct_parse() {
    let text = r#"{"title":"Picnic","tips_and_considerations":["Bring a blanket"],"extra":{"n":1}}"#;
    let fenced = format!("```json\n{}\n```", text);

    let result = normalize(&RawModelResponse::from(fenced.as_str()));
    let expected: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(result.payload().unwrap().value(), &expected);
    assert_eq!(result.to_value(), expected);
}

#[test]
fn test_fence_stripping_is_idempotent() {
    let text = "```json\n{\"title\": \"Twice\"}\n```";
    let once = strip_code_fence(text);
    assert_eq!(strip_code_fence(once), once);
}

#[test]
fn test_permissive_accepts_any_json_and_strict_rejects_it() {
    let raw = RawModelResponse::from("[1, 2, 3]");

    assert!(normalize(&raw).is_plan());
    let strict = normalize_plan_with(&raw, Validator::Strict);
    assert!(matches!(strict, PlanResult::Error(ref record) if record.kind == ErrorKind::MalformedJson));
}

#[test]
fn test_itinerary_normalization() {
    let raw = RawModelResponse::from(
        "```json\n{\"title\":\"Evening\",\"timeline\":[{\"time\":\"7:00 PM\",\"activity\":\"Dinner\"}]}\n```",
    );

    let itinerary = normalize_itinerary(&raw).itinerary().unwrap();
    assert_eq!(itinerary.timeline.len(), 1);
    assert_eq!(itinerary.timeline[0].activity.as_deref(), Some("Dinner"));
}

#[test]
fn test_mistyped_booking_flag_keeps_itinerary_readable() {
    let raw = RawModelResponse::from(
        "{\"title\":\"Night Out\",\"timeline\":[{\"time\":\"8:00 PM\",\"activity\":\"Tapas\",\"booking_required\":\"yes\",\"tips\":[\"Sit outside\"]}]}",
    );

    let itinerary = normalize_itinerary(&raw).itinerary().unwrap();
    let entry = &itinerary.timeline[0];
    assert_eq!(entry.activity.as_deref(), Some("Tapas"));
    assert_eq!(entry.booking_required, None);
    assert_eq!(entry.tips, vec!["Sit outside"]);
}
