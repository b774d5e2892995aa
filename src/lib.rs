//! date-night-planner: prompt building and response normalization
//! for an LLM-backed date night planner.
//!
//! Preferences go in as a [`PlanRequest`], a prompt comes out, a
//! [`TextGenerator`] (Gemini by default) produces free-form text, and the
//! normalizer turns that text into a [`PlanResult`]: either a structured plan
//! or an error record that says what went wrong.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use date_night_planner::{Budget, PlanRequest, Planner, PlannerConfig, PrepTime};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PlannerConfig::from_env()?;
//!     let planner = Planner::new(&config);
//!
//!     let request = PlanRequest::new("Romantic ❤️", "At Home 🏠", Budget::Level(2), PrepTime::Level(2))
//!         .with_model(config.default_model.clone());
//!
//!     let result = planner.generate_plan(&request).await;
//!     println!("{}", date_night_planner::render::render_plan_result(&result));
//!     Ok(())
//! }
//! ```

extern crate self as date_night_planner;

pub mod core;
pub mod error;
pub mod render;
pub mod schemas;
pub mod services;
pub mod types;

pub use core::{PlanView, Planner, PlannerConfig, PlannerSession, PLACEHOLDER_MESSAGE};
pub use dateplan_macros::completion_schema;
pub use error::{ErrorKind, ErrorRecord, ParsePosition, PlannerError, Result};
pub use schemas::validator::Validator;
pub use schemas::{schema_type_name, CompletionSchema, SchemaHandle};
pub use services::{
    build_itinerary_prompt, build_plan_prompt, normalize, normalize_itinerary, GeminiClient,
    GenerationCall, TextGenerator,
};
pub use types::response::{deserialize_structured_response, StructuredPayload};
pub use types::{
    Budget, DatePlan, EmojiStory, ItineraryPlan, ItineraryRequest, ItineraryResult, PlanDetails,
    PlanRequest, PlanResult, PlanningStyle, PrepTime, RawModelResponse, ResponsePart,
    TimelineEntry,
};

pub use schemas as schema;
pub use types::plan_types;

#[cfg(feature = "cli")]
pub mod cli;
