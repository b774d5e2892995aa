use tracing::info;

use crate::{
    error::ErrorRecord,
    types::{DatePlan, ItineraryResult, PlanResult, StructuredPayload},
};

/// Shown before the first generation.
pub const PLACEHOLDER_MESSAGE: &str = "Your date idea will appear here! ✨";

/// What the plan panel should currently show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanView<'a> {
    Placeholder(&'static str),
    Plan(&'a StructuredPayload),
    Error(&'a ErrorRecord),
}

/// Results held between user actions. Transitions consume the session and
/// return the next one; nothing is shared or mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerSession {
    plan: Option<PlanResult>,
    itinerary: Option<ItineraryResult>,
}

impl PlannerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current plan. Any itinerary belonged to the old plan and is dropped.
    pub fn with_plan(self, result: PlanResult) -> Self {
        info!(
            target: "dateplan::session",
            success = result.is_plan(),
            "plan result stored"
        );
        Self {
            plan: Some(result),
            itinerary: None,
        }
    }

    pub fn with_itinerary(self, result: ItineraryResult) -> Self {
        info!(
            target: "dateplan::session",
            success = result.is_itinerary(),
            "itinerary result stored"
        );
        Self {
            itinerary: Some(result),
            ..self
        }
    }

    pub fn plan_view(&self) -> PlanView<'_> {
        match &self.plan {
            None => PlanView::Placeholder(PLACEHOLDER_MESSAGE),
            Some(PlanResult::Plan(payload)) => PlanView::Plan(payload),
            Some(PlanResult::Error(record)) => PlanView::Error(record),
        }
    }

    pub fn plan_result(&self) -> Option<&PlanResult> {
        self.plan.as_ref()
    }

    pub fn itinerary(&self) -> Option<&ItineraryResult> {
        self.itinerary.as_ref()
    }

    /// The current plan, when it succeeded and can seed an itinerary call.
    pub fn itinerary_seed(&self) -> Option<DatePlan> {
        self.plan.as_ref().and_then(|result| result.plan().ok())
    }
}
