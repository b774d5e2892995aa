pub mod gemini_client;
pub mod generator;
pub mod normalizer;
pub mod prompt;

pub use gemini_client::GeminiClient;
pub use generator::{GenerationCall, TextGenerator};
pub use normalizer::{
    extract_text, normalize, normalize_itinerary, normalize_itinerary_with, normalize_json,
    normalize_plan_with, parse_json, strip_code_fence,
};
pub use prompt::{build_itinerary_prompt, build_itinerary_prompt_for, build_plan_prompt};
