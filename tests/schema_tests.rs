use date_night_planner::{
    completion_schema, CompletionSchema, DatePlan, ItineraryPlan, PlannerError, Validator,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

/// A gift suggestion returned by the model
#[completion_schema(name = "gift_idea", required = "name")]
#[derive(Debug, Deserialize, JsonSchema)]
struct GiftIdea {
    /// What to give
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    price: Option<f64>,
}

#[test]
fn test_macro_schema_metadata() {
    let handle = GiftIdea::schema();

    assert_eq!(handle.schema_name(), "gift_idea");
    assert_eq!(handle.type_name(), "GiftIdea");
    assert_eq!(handle.required_fields(), &["name"]);
    assert_eq!(handle.schema_json()["title"], "gift_idea");
    assert_eq!(
        handle.schema_json()["description"],
        "A gift suggestion returned by the model"
    );
    assert_eq!(
        handle.schema_json()["properties"]["name"]["description"],
        "What to give"
    );
}

#[test]
fn test_strict_schema_enforces_required_fields() {
    assert!(GiftIdea::schema().schema_json().get("required").is_none());
    assert_eq!(
        GiftIdea::schema().strict_schema_json()["required"],
        json!(["name"])
    );

    let err = Validator::Strict
        .validate::<GiftIdea>(json!({ "price": 20.0 }))
        .unwrap_err();
    assert!(matches!(err, PlannerError::SchemaMismatch { .. }));

    let gift = Validator::Strict
        .validate::<GiftIdea>(json!({ "name": "Polaroid camera", "price": 79.0 }))
        .unwrap();
    assert_eq!(gift.name.as_deref(), Some("Polaroid camera"));
}

#[test]
fn test_permissive_validation_reports_field_path() {
    let err = Validator::Permissive
        .validate::<GiftIdea>(json!({ "price": "cheap" }))
        .unwrap_err();

    match err {
        PlannerError::Validation(message) => assert!(message.contains("price")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_builtin_schemas_required_fields() {
    assert_eq!(
        DatePlan::schema().required_fields(),
        &["title", "plan_details", "tips_and_considerations"]
    );
    assert_eq!(ItineraryPlan::schema().required_fields(), &["title", "timeline"]);

    let plan = Validator::Strict
        .validate::<DatePlan>(json!({
            "title": "Board Game Night",
            "plan_details": { "step_1_title": "Pick games" },
            "tips_and_considerations": []
        }))
        .unwrap();
    assert_eq!(plan.title.as_deref(), Some("Board Game Night"));
}
