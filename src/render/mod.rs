//! Markdown rendering for plans, itineraries and error records.
//!
//! Rendering is permissive: every missing field prints as `N/A` and optional
//! sections are left out when empty.

use crate::{
    core::session::PlanView,
    error::ErrorRecord,
    types::{DatePlan, ItineraryPlan, ItineraryResult, PlanResult, StructuredPayload},
};

const MISSING: &str = "N/A";

fn or_missing(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(MISSING)
}

pub fn render_plan(plan: &DatePlan) -> String {
    let mut lines = Vec::new();

    lines.push(format!("## {}", or_missing(&plan.title)));
    lines.push(format!("**Theme:** {}", or_missing(&plan.theme)));
    lines.push(format!("**Activity Type:** {}", or_missing(&plan.activity_type)));
    lines.push(format!("**Budget Guide:** {}", or_missing(&plan.budget_guide)));
    lines.push(format!("**Prep Time Guide:** {}", or_missing(&plan.prep_time_guide)));
    if let Some(hours) = plan.duration_hours {
        lines.push(format!("**Duration:** {} hours", hours));
    }
    if plan.planning_style.is_some() {
        lines.push(format!("**Planning Style:** {}", or_missing(&plan.planning_style)));
    }

    lines.push(String::new());
    lines.push("### 🎉 The Plan:".to_string());
    let details = plan.plan_details.clone().unwrap_or_default();
    lines.push(format!(
        "1. **{}:** {}",
        or_missing(&details.step_1_title),
        or_missing(&details.step_1_description)
    ));
    lines.push(format!(
        "2. **{}:** {}",
        or_missing(&details.step_2_title),
        or_missing(&details.step_2_description)
    ));
    let mut step = 3;
    if details.food_drinks_suggestions.is_some() {
        lines.push(format!(
            "{}. **Food/Drinks:** {}",
            step,
            or_missing(&details.food_drinks_suggestions)
        ));
        step += 1;
    }
    if details.ambiance_extras_suggestions.is_some() {
        lines.push(format!(
            "{}. **Ambiance/Extras:** {}",
            step,
            or_missing(&details.ambiance_extras_suggestions)
        ));
    }

    lines.push(String::new());
    lines.push("### 💡 Tips & Considerations:".to_string());
    if plan.tips_and_considerations.is_empty() {
        lines.push(format!("* {}", MISSING));
    } else {
        lines.extend(plan.tips_and_considerations.iter().map(|tip| format!("* {}", tip)));
    }

    if let Some(story) = &plan.emoji_story {
        lines.push(String::new());
        lines.push("### 📖 Emoji Story:".to_string());
        lines.push(or_missing(&story.story).to_string());
        lines.push(format!("_{}_", or_missing(&story.description)));
    }

    if plan.model_used.is_some() {
        lines.push(String::new());
        lines.push(format!("_Generated with {}_", or_missing(&plan.model_used)));
    }

    lines.join("\n")
}

pub fn render_itinerary(itinerary: &ItineraryPlan) -> String {
    let mut lines = Vec::new();

    lines.push(format!("## 🗺️ {}", or_missing(&itinerary.title)));
    if itinerary.location_note.is_some() {
        lines.push(format!("_{}_", or_missing(&itinerary.location_note)));
    }

    lines.push(String::new());
    lines.push("### Timeline".to_string());
    if itinerary.timeline.is_empty() {
        lines.push(MISSING.to_string());
    }
    for entry in &itinerary.timeline {
        lines.push(format!(
            "#### {} | {}",
            or_missing(&entry.time),
            or_missing(&entry.activity)
        ));
        lines.push(format!(
            "- **Where:** {} ({})",
            or_missing(&entry.location),
            or_missing(&entry.address)
        ));
        lines.push(format!("- **Details:** {}", or_missing(&entry.details)));
        lines.push(format!(
            "- **Cost:** {} | **Duration:** {}",
            or_missing(&entry.cost_estimate),
            or_missing(&entry.duration)
        ));
        lines.push(format!("- **Parking:** {}", or_missing(&entry.parking)));
        match (entry.booking_required, &entry.booking_link) {
            (Some(true), Some(link)) => lines.push(format!("- **Booking required:** {}", link)),
            (Some(true), None) => lines.push("- **Booking required**".to_string()),
            _ => {}
        }
        for tip in &entry.tips {
            lines.push(format!("  - 💡 {}", tip));
        }
    }

    push_list(&mut lines, "### Backup Options", &itinerary.backup_options);

    lines.push(String::new());
    lines.push(format!(
        "**Getting around:** {}",
        or_missing(&itinerary.transportation_notes)
    ));
    lines.push(format!(
        "**Total estimated cost:** {}",
        or_missing(&itinerary.total_estimated_cost)
    ));
    lines.push(format!(
        "**If the weather turns:** {}",
        or_missing(&itinerary.weather_contingency)
    ));

    push_list(
        &mut lines,
        "### Special Considerations",
        &itinerary.special_considerations,
    );

    lines.join("\n")
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(heading.to_string());
    lines.extend(items.iter().map(|item| format!("* {}", item)));
}

pub fn render_error(record: &ErrorRecord) -> String {
    let mut lines = vec![format!("⚠️ {}", record.message)];

    if let Some(detail) = &record.detail {
        lines.push(format!("Details: {}", detail));
    }
    if let Some(position) = &record.position {
        lines.push(format!(
            "Parse failure at line {}, column {}",
            position.line, position.column
        ));
    }
    if let Some(excerpt) = &record.excerpt {
        lines.push("```".to_string());
        lines.push(excerpt.clone());
        lines.push("```".to_string());
    }
    if record.retryable {
        lines.push("You can try again in a moment.".to_string());
    }

    lines.join("\n")
}

/// Payloads whose fields have unexpected types fall back to pretty JSON.
fn render_raw_payload(payload: &StructuredPayload) -> String {
    let pretty = serde_json::to_string_pretty(payload.value())
        .unwrap_or_else(|_| payload.value().to_string());
    format!("```json\n{}\n```", pretty)
}

pub fn render_plan_result(result: &PlanResult) -> String {
    match result {
        PlanResult::Plan(payload) => match payload.deserialize::<DatePlan>() {
            Ok(plan) => render_plan(&plan),
            Err(_) => render_raw_payload(payload),
        },
        PlanResult::Error(record) => render_error(record),
    }
}

pub fn render_itinerary_result(result: &ItineraryResult) -> String {
    match result {
        ItineraryResult::Itinerary(payload) => match payload.deserialize::<ItineraryPlan>() {
            Ok(itinerary) => render_itinerary(&itinerary),
            Err(_) => render_raw_payload(payload),
        },
        ItineraryResult::Error(record) => render_error(record),
    }
}

pub fn render_plan_view(view: PlanView<'_>) -> String {
    match view {
        PlanView::Placeholder(message) => message.to_string(),
        PlanView::Plan(payload) => render_plan_result(&PlanResult::Plan(payload.clone())),
        PlanView::Error(record) => render_error(record),
    }
}
