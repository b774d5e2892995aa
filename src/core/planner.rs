use tracing::{info, warn};

use crate::{
    core::config::PlannerConfig,
    error::{PlannerError, Result},
    schemas::Validator,
    services::{
        gemini_client::GeminiClient,
        generator::{GenerationCall, TextGenerator},
        normalizer::{normalize_itinerary_with, normalize_plan_with},
        prompt::{build_itinerary_prompt, build_plan_prompt},
    },
    types::{ItineraryRequest, ItineraryResult, PlanRequest, PlanResult, RawModelResponse},
};

/// Runs prompt building, the generation call and normalization as one step.
///
/// Every entry point returns a result enum; failures become error records.
#[derive(Debug)]
pub struct Planner<G = GeminiClient> {
    generator: G,
    api_key: Option<String>,
    validator: Validator,
}

impl Planner<GeminiClient> {
    pub fn new(config: &PlannerConfig) -> Self {
        let client = GeminiClient::new()
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout)
            .with_json_mode(config.json_mode)
            .with_max_output_tokens(config.max_output_tokens)
            .with_temperature(config.temperature);
        Self::with_generator(config, client)
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(&PlannerConfig::from_env()?))
    }
}

impl<G: TextGenerator> Planner<G> {
    pub fn with_generator(config: &PlannerConfig, generator: G) -> Self {
        Self {
            generator,
            api_key: config.api_key.clone(),
            validator: config.validator,
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub async fn generate_plan(&self, request: &PlanRequest) -> PlanResult {
        match self
            .dispatch(request.model(), || build_plan_prompt(request))
            .await
        {
            Ok(raw) => normalize_plan_with(&raw, self.validator),
            Err(err) => PlanResult::from_error(&err),
        }
    }

    pub async fn generate_itinerary(&self, request: &ItineraryRequest) -> ItineraryResult {
        match self
            .dispatch(request.model(), || build_itinerary_prompt(request))
            .await
        {
            Ok(raw) => normalize_itinerary_with(&raw, self.validator),
            Err(err) => ItineraryResult::from_error(&err),
        }
    }

    /// Check credentials and selection before building the prompt or calling out.
    async fn dispatch<F>(&self, model: &str, build_prompt: F) -> Result<RawModelResponse>
    where
        F: FnOnce() -> String,
    {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(PlannerError::MissingCredential)?;

        let model = model.trim();
        if model.is_empty() {
            return Err(PlannerError::MissingSelection);
        }

        let prompt = build_prompt();
        info!(target: "dateplan::planner", model, "requesting generation");

        let response = self
            .generator
            .generate(GenerationCall {
                api_key,
                model,
                prompt: &prompt,
            })
            .await;

        if let Err(err) = &response {
            warn!(
                target: "dateplan::planner",
                code = err.error_code(),
                error = %err,
                "generation call failed"
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        types::{Budget, DatePlan, PrepTime},
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingGenerator {
        reply: String,
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, call: GenerationCall<'_>) -> Result<RawModelResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((call.api_key.to_string(), call.model.to_string()));
            Ok(RawModelResponse::Text {
                text: self.reply.clone(),
            })
        }
    }

    fn request() -> PlanRequest {
        PlanRequest::new("Fun 🎉", "Outdoor 🌳", Budget::Level(3), PrepTime::Level(2))
            .with_model("gemini-unit")
    }

    #[test]
    fn test_key_and_model_are_passed_through_trimmed() {
        let generator = RecordingGenerator {
            reply: "```json\n{\"title\":\"Kite Day\"}\n```".to_string(),
            ..Default::default()
        };
        let config = PlannerConfig::new().with_api_key(" key-123 ");
        let planner = Planner::with_generator(&config, generator);

        let result = tokio_test::block_on(planner.generate_plan(&request()));

        assert_eq!(result.plan().unwrap().title.as_deref(), Some("Kite Day"));
        let calls = planner.generator().calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[("key-123".to_string(), "gemini-unit".to_string())]
        );
    }

    #[test]
    fn test_blank_model_is_missing_selection() {
        let config = PlannerConfig::new().with_api_key("key");
        let planner = Planner::with_generator(&config, RecordingGenerator::default());

        let result = tokio_test::block_on(planner.generate_plan(&request().with_model("   ")));

        assert_eq!(result.error().unwrap().kind, ErrorKind::MissingSelection);
        assert!(planner.generator().calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_itinerary_uses_request_model() {
        let generator = RecordingGenerator {
            reply: "{\"title\":\"Night\",\"timeline\":[]}".to_string(),
            ..Default::default()
        };
        let config = PlannerConfig::new().with_api_key("key");
        let planner = Planner::with_generator(&config, generator);
        let itinerary_request = ItineraryRequest::new(DatePlan::default()).with_model("gemini-it");

        let result = tokio_test::block_on(planner.generate_itinerary(&itinerary_request));

        assert!(result.is_itinerary());
        assert_eq!(planner.generator().calls.lock().unwrap()[0].1, "gemini-it");
    }
}
