use super::lenient;
use crate::completion_schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured date night plan returned by the plan prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[completion_schema(
    name = "date_plan",
    required = "title, plan_details, tips_and_considerations"
)]
pub struct DatePlan {
    /// Catchy title for the date
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: Option<String>,
    /// Theme the plan was written for
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub theme: Option<String>,
    /// Activity type the plan was written for
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub activity_type: Option<String>,
    /// Budget guidance restated by the model
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub budget_guide: Option<String>,
    /// Preparation-time guidance restated by the model
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub prep_time_guide: Option<String>,
    /// Expected length of the date in hours
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub duration_hours: Option<f64>,
    /// Planning style the plan follows
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub planning_style: Option<String>,
    /// Identifier of the model that produced the plan
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub model_used: Option<String>,
    /// The two main steps plus optional extras
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub plan_details: Option<PlanDetails>,
    /// Tips for adapting or enjoying the plan
    #[serde(default, deserialize_with = "lenient::list")]
    pub tips_and_considerations: Vec<String>,
    /// The date told as a sequence of emoji
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub emoji_story: Option<EmojiStory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlanDetails {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub step_1_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub step_1_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub step_2_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub step_2_description: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub food_drinks_suggestions: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub ambiance_extras_suggestions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmojiStory {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub story: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub description: Option<String>,
}

/// Detailed itinerary expanding a previously generated plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[completion_schema(name = "date_itinerary", required = "title, timeline")]
pub struct ItineraryPlan {
    /// Title of the itinerary
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: Option<String>,
    /// Note on how the location shaped the venues
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub location_note: Option<String>,
    /// Chronological stops of the evening
    #[serde(default, deserialize_with = "lenient::list")]
    pub timeline: Vec<TimelineEntry>,
    /// Alternatives if a venue is closed or full
    #[serde(default, deserialize_with = "lenient::list")]
    pub backup_options: Vec<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub transportation_notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub total_estimated_cost: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub weather_contingency: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub special_considerations: Vec<String>,
}

/// One stop on the itinerary timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimelineEntry {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub activity: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub booking_required: Option<bool>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub booking_link: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub cost_estimate: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub parking: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub tips: Vec<String>,
}
