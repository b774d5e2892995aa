use std::fmt::Display;

use tracing::debug;

use crate::types::{
    request::NOT_SPECIFIED, DatePlan, ItineraryRequest, PlanDetails, PlanRequest,
};

const PLAN_SCHEMA: &str = r#"{
  "title": "Catchy date night title",
  "theme": "The theme from preference 1",
  "activity_type": "The activity type from preference 2",
  "budget_guide": "Short restatement of the budget from preference 3",
  "prep_time_guide": "Short restatement of the preparation time from preference 4",
  "duration_hours": null,
  "planning_style": "The planning style from preference 6, or null",
  "model_used": "The model identifier from preference 9",
  "plan_details": {
    "step_1_title": "Short title of the first activity or preparation step",
    "step_1_description": "What to do in the first step",
    "step_2_title": "Short title of the second activity or step",
    "step_2_description": "What to do in the second step",
    "food_drinks_suggestions": "Food and drink ideas matching theme and budget, or null",
    "ambiance_extras_suggestions": "Music, decoration or other touches, or null"
  },
  "tips_and_considerations": [
    "A tip related to the plan, or how to adapt it",
    "Another tip, especially about the user's restrictions"
  ],
  "emoji_story": {
    "story": "A long sequence of emoji telling the date from start to finish",
    "description": "One sentence explaining the emoji story"
  }
}"#;

const PLAN_LENGTH_RULES: &str = "\
- title: at most 8 words.
- theme, activity_type, planning_style, model_used: copy the preference text, nothing more.
- budget_guide and prep_time_guide: at most 15 words each.
- duration_hours: a number of hours, or null when no maximum duration was given.
- step titles: at most 6 words each.
- step descriptions: at most 45 words each.
- food_drinks_suggestions and ambiance_extras_suggestions: at most 30 words each.
- tips_and_considerations: 2 to 4 tips, at most 25 words each.
- emoji_story.story: 10 to 20 emoji, no words.
- emoji_story.description: at most 25 words.";

const ITINERARY_SCHEMA: &str = r#"{
  "title": "Title of the itinerary",
  "location_note": "How the location shaped the venue choices, or null",
  "timeline": [
    {
      "time": "Start time, e.g. 6:30 PM",
      "activity": "What happens at this stop",
      "location": "Venue name or venue type",
      "address": "Street address, or a neighbourhood when unknown",
      "details": "What to expect and what to order or do",
      "booking_required": true,
      "booking_link": "Reservation URL, or null",
      "cost_estimate": "Cost for two, e.g. $40-60",
      "duration": "How long to stay, e.g. 1.5 hours",
      "parking": "Parking or transit note",
      "tips": ["A practical tip for this stop"]
    }
  ],
  "backup_options": ["An alternative if a stop is closed or full"],
  "transportation_notes": "How to get between stops",
  "total_estimated_cost": "Total for two",
  "weather_contingency": "What to change if the weather turns",
  "special_considerations": ["Accessibility, dietary or timing notes"]
}"#;

const ITINERARY_LENGTH_RULES: &str = "\
- title: at most 10 words.
- location_note: at most 25 words.
- timeline: 3 to 6 entries in chronological order.
- time: a single clock time, at most 3 words.
- activity and location: at most 8 words each.
- address: at most 12 words.
- booking_link: a single URL with no surrounding text.
- details: at most 40 words.
- tips: at most 2 per entry, at most 20 words each.
- cost_estimate, duration, parking: at most 12 words each.
- backup_options and special_considerations: at most 3 items, at most 25 words each.
- transportation_notes, total_estimated_cost, weather_contingency: at most 30 words each.";

/// Render a plan request into the instruction string for the plan call.
pub fn build_plan_prompt(request: &PlanRequest) -> String {
    let constraints = request
        .constraints()
        .map(|text| format!("\"{}\"", text))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let prompt = format!(
        "You are a creative and helpful date night planning assistant.\n\
Your goal is to generate a fun and suitable date night plan based on the user's preferences.\n\
\n\
User Preferences:\n\
1. Theme: {theme}\n\
2. Activity Type: {activity}\n\
3. Budget: {budget}\n\
4. Time to Prepare: {prep}\n\
5. Maximum Duration: {duration}\n\
6. Planning Style: {style}\n\
7. Location: {location}\n\
8. Specific Suggestions or Restrictions: {constraints}\n\
9. Model: {model}\n\
\n\
Make the plan creative and fitting for the theme and activity type. Respect the budget, \
the preparation time and any maximum duration. If suggestions or restrictions were given, \
incorporate or respect them. Preferences marked \"{placeholder}\" are open to your judgement.\n\
\n\
Respond with ONLY a single JSON object, without Markdown fences or commentary, using exactly \
these field names and this nesting:\n\
{schema}\n\
\n\
Keep every field concise:\n\
{rules}\n",
        theme = or_placeholder(request.theme()),
        activity = or_placeholder(request.activity_type()),
        budget = request.budget(),
        prep = request.prep_time(),
        duration = request
            .max_duration_hours()
            .map(|hours| format!("{} hours", hours))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        style = display_or_placeholder(request.planning_style()),
        location = display_or_placeholder(request.location()),
        constraints = constraints,
        model = or_placeholder(request.model()),
        placeholder = NOT_SPECIFIED,
        schema = PLAN_SCHEMA,
        rules = PLAN_LENGTH_RULES,
    );

    debug!(
        target: "dateplan::prompt",
        chars = prompt.chars().count(),
        model = request.model(),
        "built plan prompt"
    );
    prompt
}

/// Render a prior plan into the instruction string for the itinerary call.
pub fn build_itinerary_prompt(request: &ItineraryRequest) -> String {
    let plan = request.plan();
    let empty_details = PlanDetails::default();
    let details = plan.plan_details.as_ref().unwrap_or(&empty_details);

    let location_guidance = if request.location().is_some() {
        "Use real, currently operating venues in or near that location."
    } else {
        "No location was given: describe venue types instead of named businesses and say so in location_note."
    };

    let prompt = format!(
        "You are a meticulous local date planner.\n\
Expand the date night plan below into a detailed, realistic itinerary with concrete venues, \
timing and costs.\n\
\n\
Date Night Plan:\n\
- Title: {title}\n\
- Theme: {theme}\n\
- Activity Type: {activity}\n\
- Budget: {budget}\n\
- Preparation: {prep}\n\
- Duration: {duration}\n\
- Planning Style: {style}\n\
- Step 1: {step_1_title}: {step_1_description}\n\
- Step 2: {step_2_title}: {step_2_description}\n\
- Food & Drinks: {food}\n\
- Ambiance & Extras: {ambiance}\n\
- Location: {location}\n\
\n\
{location_guidance}\n\
\n\
Respond with ONLY a single JSON object, without Markdown fences or commentary, using exactly \
these field names and this nesting:\n\
{schema}\n\
\n\
Keep every field concise:\n\
{rules}\n",
        title = opt_or_placeholder(&plan.title),
        theme = opt_or_placeholder(&plan.theme),
        activity = opt_or_placeholder(&plan.activity_type),
        budget = opt_or_placeholder(&plan.budget_guide),
        prep = opt_or_placeholder(&plan.prep_time_guide),
        duration = plan
            .duration_hours
            .map(|hours| format!("{} hours", hours))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        style = opt_or_placeholder(&plan.planning_style),
        step_1_title = opt_or_placeholder(&details.step_1_title),
        step_1_description = opt_or_placeholder(&details.step_1_description),
        step_2_title = opt_or_placeholder(&details.step_2_title),
        step_2_description = opt_or_placeholder(&details.step_2_description),
        food = opt_or_placeholder(&details.food_drinks_suggestions),
        ambiance = opt_or_placeholder(&details.ambiance_extras_suggestions),
        location = display_or_placeholder(request.location()),
        location_guidance = location_guidance,
        schema = ITINERARY_SCHEMA,
        rules = ITINERARY_LENGTH_RULES,
    );

    debug!(
        target: "dateplan::prompt",
        chars = prompt.chars().count(),
        model = request.model(),
        "built itinerary prompt"
    );
    prompt
}

/// Convenience for callers holding only the plan.
pub fn build_itinerary_prompt_for(plan: &DatePlan, location: Option<&str>) -> String {
    let mut request = ItineraryRequest::new(plan.clone());
    if let Some(location) = location {
        request = request.with_location(location);
    }
    build_itinerary_prompt(&request)
}

fn or_placeholder(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_SPECIFIED
    } else {
        trimmed
    }
}

fn opt_or_placeholder(value: &Option<String>) -> &str {
    value.as_deref().map(or_placeholder).unwrap_or(NOT_SPECIFIED)
}

fn display_or_placeholder<T: Display>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}
