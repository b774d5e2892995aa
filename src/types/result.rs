use super::{
    plan_types::{DatePlan, ItineraryPlan},
    response::StructuredPayload,
};
use crate::error::{ErrorRecord, PlannerError, Result as PlannerResult};
use serde_json::{json, Value};

/// Outcome of the plan flow: a parsed plan or an error record, never both
#[derive(Debug, Clone, PartialEq)]
pub enum PlanResult {
    Plan(StructuredPayload),
    Error(ErrorRecord),
}

/// Outcome of the itinerary flow
#[derive(Debug, Clone, PartialEq)]
pub enum ItineraryResult {
    Itinerary(StructuredPayload),
    Error(ErrorRecord),
}

impl PlanResult {
    pub fn from_error(err: &PlannerError) -> Self {
        PlanResult::Error(err.to_error_record())
    }

    pub fn is_plan(&self) -> bool {
        matches!(self, PlanResult::Plan(_))
    }

    pub fn payload(&self) -> Option<&StructuredPayload> {
        match self {
            PlanResult::Plan(payload) => Some(payload),
            PlanResult::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorRecord> {
        match self {
            PlanResult::Plan(_) => None,
            PlanResult::Error(record) => Some(record),
        }
    }

    /// Typed view of a successful plan. Fails on the error variant or when a
    /// field has the wrong JSON type.
    pub fn plan(&self) -> PlannerResult<DatePlan> {
        match self {
            PlanResult::Plan(payload) => payload.deserialize::<DatePlan>(),
            PlanResult::Error(record) => Err(PlannerError::Validation(format!(
                "no plan available: {}",
                record.message
            ))),
        }
    }

    /// JSON form handed to renderers: the plan verbatim, or `{"error": ...}`.
    pub fn to_value(&self) -> Value {
        match self {
            PlanResult::Plan(payload) => payload.value().clone(),
            PlanResult::Error(record) => error_value(record),
        }
    }
}

impl ItineraryResult {
    pub fn from_error(err: &PlannerError) -> Self {
        ItineraryResult::Error(err.to_error_record())
    }

    pub fn is_itinerary(&self) -> bool {
        matches!(self, ItineraryResult::Itinerary(_))
    }

    pub fn payload(&self) -> Option<&StructuredPayload> {
        match self {
            ItineraryResult::Itinerary(payload) => Some(payload),
            ItineraryResult::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorRecord> {
        match self {
            ItineraryResult::Itinerary(_) => None,
            ItineraryResult::Error(record) => Some(record),
        }
    }

    pub fn itinerary(&self) -> PlannerResult<ItineraryPlan> {
        match self {
            ItineraryResult::Itinerary(payload) => payload.deserialize::<ItineraryPlan>(),
            ItineraryResult::Error(record) => Err(PlannerError::Validation(format!(
                "no itinerary available: {}",
                record.message
            ))),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ItineraryResult::Itinerary(payload) => payload.value().clone(),
            ItineraryResult::Error(record) => error_value(record),
        }
    }
}

fn error_value(record: &ErrorRecord) -> Value {
    serde_json::to_value(record).unwrap_or_else(|_| json!({ "error": record.message }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_plan_variant_exposes_typed_view() {
        let result = PlanResult::Plan(StructuredPayload::for_schema::<DatePlan>(json!({
            "title": "Stargazing Picnic",
            "tips_and_considerations": ["Bring a blanket"]
        })));

        assert!(result.is_plan());
        assert!(result.error().is_none());
        let plan = result.plan().unwrap();
        assert_eq!(plan.title.as_deref(), Some("Stargazing Picnic"));
        assert_eq!(plan.tips_and_considerations, vec!["Bring a blanket"]);
        assert!(plan.plan_details.is_none());
    }

    #[test]
    fn test_error_variant_serializes_with_error_key() {
        let result = PlanResult::from_error(&PlannerError::MissingSelection);

        assert!(!result.is_plan());
        assert_eq!(result.error().unwrap().kind, ErrorKind::MissingSelection);
        assert!(result.to_value().get("error").is_some());
        assert!(result.plan().is_err());
    }

    #[test]
    fn test_plan_payload_cannot_be_read_as_itinerary() {
        let result = ItineraryResult::Itinerary(StructuredPayload::for_schema::<DatePlan>(
            json!({ "title": "x" }),
        ));
        assert!(result.itinerary().is_err());
    }

    #[test]
    fn test_mistyped_fields_fall_back_to_defaults() {
        let result = PlanResult::Plan(StructuredPayload::for_schema::<DatePlan>(json!({
            "title": "Rooftop Tapas",
            "duration_hours": "about 3",
            "tips_and_considerations": "not a list",
            "plan_details": { "step_1_title": 1, "step_2_title": "Dance" }
        })));

        let plan = result.plan().unwrap();
        assert_eq!(plan.title.as_deref(), Some("Rooftop Tapas"));
        assert_eq!(plan.duration_hours, None);
        assert!(plan.tips_and_considerations.is_empty());
        let details = plan.plan_details.unwrap();
        assert_eq!(details.step_1_title, None);
        assert_eq!(details.step_2_title.as_deref(), Some("Dance"));
    }

    #[test]
    fn test_non_object_payload_has_no_typed_view() {
        let result = PlanResult::Plan(StructuredPayload::for_schema::<DatePlan>(json!([1, 2])));

        let err = result.plan().unwrap_err().to_string();
        assert!(err.contains("not a JSON object"), "{err}");
    }
}
