use super::plan_types::DatePlan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Theme labels offered by the preference form.
pub const THEMES: [&str; 6] = [
    "Romantic ❤️",
    "Fun 🎉",
    "Chill 🧘",
    "Adventure 🚀",
    "Artsy 🎨",
    "Homebody 🏡",
];

/// Activity type labels offered by the preference form.
pub const ACTIVITY_TYPES: [&str; 5] = [
    "At Home 🏠",
    "Out (Casual)🚶",
    "Out (Fancy)👗",
    "Outdoor 🌳",
    "Create 🖌️",
];

pub fn budget_level_description(level: u8) -> &'static str {
    match level.clamp(1, 5) {
        1 => "Extremely tight, focus on free or DIY options, minimal to no spending.",
        2 => "Very low budget, some minimal spending is acceptable.",
        3 => "Moderate budget, allows for a casual outing or some purchases.",
        4 => "Generous budget, can afford a nice dinner out or event tickets.",
        _ => "Splurge / Special Occasion, high budget, willing to spend significantly.",
    }
}

pub fn prep_time_level_description(level: u8) -> &'static str {
    match level.clamp(1, 5) {
        1 => "Almost no preparation needed (under 30 mins), very spontaneous.",
        2 => "Quick preparation (30 mins to 1 hour).",
        3 => "Moderate preparation (1-2 hours).",
        4 => "Involved preparation (2-4 hours), some planning.",
        _ => "Elaborate preparation (4+ hours), significant planning.",
    }
}

/// Spending guidance, either on the 1-5 slider scale or as an amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    Level(u8),
    Amount { amount: f64, currency: String },
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Level(level) => {
                let level = (*level).clamp(1, 5);
                write!(
                    f,
                    "level {}/5 ({})",
                    level,
                    budget_level_description(level)
                )
            }
            Budget::Amount { amount, currency } => write!(f, "{} {}", amount, currency.trim()),
        }
    }
}

/// Preparation effort, either on the 1-5 slider scale or as a free-text duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepTime {
    Level(u8),
    Duration(String),
}

impl fmt::Display for PrepTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepTime::Level(level) => {
                let level = (*level).clamp(1, 5);
                write!(
                    f,
                    "level {}/5 ({})",
                    level,
                    prep_time_level_description(level)
                )
            }
            PrepTime::Duration(text) if text.trim().is_empty() => f.write_str(NOT_SPECIFIED),
            PrepTime::Duration(text) => f.write_str(text.trim()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningStyle {
    Spontaneous,
    Balanced,
    Scheduled,
}

impl PlanningStyle {
    pub fn label(self) -> &'static str {
        match self {
            PlanningStyle::Spontaneous => "Go with the flow",
            PlanningStyle::Balanced => "Loosely planned",
            PlanningStyle::Scheduled => "Fully scheduled",
        }
    }
}

impl fmt::Display for PlanningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Placeholder rendered for every optional preference left empty.
pub const NOT_SPECIFIED: &str = "Not specified";

/// The user's selections for one generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PlanRequestFields")]
pub struct PlanRequest {
    theme: String,
    activity_type: String,
    budget: Budget,
    prep_time: PrepTime,
    max_duration_hours: Option<f64>,
    planning_style: Option<PlanningStyle>,
    constraints: Option<String>,
    location: Option<String>,
    model: String,
}

impl PlanRequest {
    pub fn new(
        theme: impl Into<String>,
        activity_type: impl Into<String>,
        budget: Budget,
        prep_time: PrepTime,
    ) -> Self {
        Self {
            theme: theme.into(),
            activity_type: activity_type.into(),
            budget,
            prep_time,
            max_duration_hours: None,
            planning_style: None,
            constraints: None,
            location: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Non-finite or non-positive durations are dropped.
    pub fn with_max_duration_hours(mut self, hours: f64) -> Self {
        self.max_duration_hours = (hours.is_finite() && hours > 0.0).then_some(hours);
        self
    }

    pub fn with_planning_style(mut self, style: PlanningStyle) -> Self {
        self.planning_style = Some(style);
        self
    }

    /// Blank text is treated as no constraints.
    pub fn with_constraints(mut self, constraints: impl Into<String>) -> Self {
        self.constraints = non_blank(constraints.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location.into());
        self
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn activity_type(&self) -> &str {
        &self.activity_type
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn prep_time(&self) -> &PrepTime {
        &self.prep_time
    }

    pub fn max_duration_hours(&self) -> Option<f64> {
        self.max_duration_hours
    }

    pub fn planning_style(&self) -> Option<PlanningStyle> {
        self.planning_style
    }

    pub fn constraints(&self) -> Option<&str> {
        self.constraints.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Wire form of [`PlanRequest`]; deserialized values go through the setters.
#[derive(Deserialize)]
struct PlanRequestFields {
    theme: String,
    activity_type: String,
    budget: Budget,
    prep_time: PrepTime,
    #[serde(default)]
    max_duration_hours: Option<f64>,
    #[serde(default)]
    planning_style: Option<PlanningStyle>,
    #[serde(default)]
    constraints: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

impl From<PlanRequestFields> for PlanRequest {
    fn from(fields: PlanRequestFields) -> Self {
        let mut request = PlanRequest::new(
            fields.theme,
            fields.activity_type,
            fields.budget,
            fields.prep_time,
        );
        if let Some(model) = fields.model {
            request = request.with_model(model);
        }
        if let Some(hours) = fields.max_duration_hours {
            request = request.with_max_duration_hours(hours);
        }
        if let Some(style) = fields.planning_style {
            request = request.with_planning_style(style);
        }
        if let Some(constraints) = fields.constraints {
            request = request.with_constraints(constraints);
        }
        if let Some(location) = fields.location {
            request = request.with_location(location);
        }
        request
    }
}

/// Input for the itinerary follow-up call, seeded with a prior plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ItineraryRequestFields")]
pub struct ItineraryRequest {
    plan: DatePlan,
    location: Option<String>,
    model: String,
}

impl ItineraryRequest {
    /// Uses the plan's `model_used` when present, otherwise the default model.
    pub fn new(plan: DatePlan) -> Self {
        let model = plan
            .model_used
            .clone()
            .and_then(non_blank)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self {
            plan,
            location: None,
            model,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn plan(&self) -> &DatePlan {
        &self.plan
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Deserialize)]
struct ItineraryRequestFields {
    #[serde(default)]
    plan: DatePlan,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

impl From<ItineraryRequestFields> for ItineraryRequest {
    fn from(fields: ItineraryRequestFields) -> Self {
        let mut request = ItineraryRequest::new(fields.plan);
        if let Some(location) = fields.location {
            request = request.with_location(location);
        }
        if let Some(model) = fields.model {
            request = request.with_model(model);
        }
        request
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
