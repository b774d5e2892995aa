use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{
    error::{PlannerError, Result},
    services::generator::{GenerationCall, TextGenerator},
    types::RawModelResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone, Debug)]
pub struct GeminiClient {
    base_url: String,
    timeout: Duration,
    max_output_tokens: Option<u32>,
    temperature: Option<f32>,
    json_mode: bool,
}

impl GeminiClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_output_tokens: None,
            temperature: None,
            json_mode: false,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: Option<u32>) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Ask the service for `application/json` output.
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate_content(&self, call: GenerationCall<'_>) -> Result<RawModelResponse> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| PlannerError::Config(format!("Failed to build HTTP client: {err}")))?;

        let mut request = GenerateContentRequest::new(call.prompt)
            .with_max_output_tokens(self.max_output_tokens)
            .with_temperature(self.temperature);
        if self.json_mode {
            request = request.with_response_mime_type("application/json");
        }

        let request_url = build_generate_url(&self.base_url, call.model);
        debug!(target: "dateplan::client", url = %request_url, "sending generateContent request");

        let response = client
            .post(&request_url)
            .header("x-goog-api-key", call.api_key)
            .header("Content-Type", "application/json")
            .json(&request.into_value())
            .send()
            .await
            .map_err(|err| PlannerError::Upstream(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let headers = response.headers().clone();
        let response_text = response
            .text()
            .await
            .map_err(|err| PlannerError::Upstream(format!("Failed to read response: {err}")))?;

        let response_json: Option<Value> = serde_json::from_str(&response_text).ok();
        let api_message = response_json
            .as_ref()
            .and_then(|body| body.get("error"))
            .map(|error| {
                error
                    .get("message")
                    .and_then(|value| value.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| error.to_string())
            });

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok());
            warn!(target: "dateplan::client", ?retry_after, "rate limited by upstream");

            return Err(PlannerError::QuotaExceeded {
                message: api_message.unwrap_or(response_text),
                retry_after,
            });
        }

        if !status.is_success() {
            let message = api_message.unwrap_or(response_text);
            warn!(target: "dateplan::client", %status, "upstream returned an error status");
            return Err(PlannerError::from_upstream_message(format!(
                "HTTP {} error: {}",
                status, message
            )));
        }

        if let Some(message) = api_message {
            return Err(PlannerError::from_upstream_message(format!(
                "API error: {}",
                message
            )));
        }

        // Non-JSON bodies are handed on as plain text for the normalizer to judge
        Ok(match response_json {
            Some(value) => RawModelResponse::from_value(value),
            None => RawModelResponse::Plain(response_text),
        })
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, call: GenerationCall<'_>) -> Result<RawModelResponse> {
        self.generate_content(call).await
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    let model = model.trim().trim_start_matches("models/");
    format!("{}/models/{}:generateContent", trimmed, model)
}

#[derive(Clone, Debug)]
pub struct GenerateContentRequest {
    prompt: String,
    max_output_tokens: Option<u32>,
    temperature: Option<f32>,
    response_mime_type: Option<String>,
}

impl GenerateContentRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_tokens: None,
            temperature: None,
            response_mime_type: None,
        }
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: Option<u32>) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_response_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.response_mime_type = Some(mime_type.into());
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": self.prompt }]
            }]
        });

        let mut generation_config = serde_json::Map::new();
        if let Some(max_output_tokens) = self.max_output_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(max_output_tokens));
        }
        if let Some(temperature) = self.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(mime_type) = self.response_mime_type {
            generation_config.insert("responseMimeType".to_string(), json!(mime_type));
        }

        if !generation_config.is_empty() {
            body["generationConfig"] = Value::Object(generation_config);
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_generate_url() {
        assert_eq!(
            build_generate_url("https://example.test/v1beta/", "gemini-pro"),
            "https://example.test/v1beta/models/gemini-pro:generateContent"
        );
        assert_eq!(
            build_generate_url("https://example.test/v1beta", "models/gemini-pro"),
            "https://example.test/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_request_body_without_config() {
        let body = GenerateContentRequest::new("hello").into_value();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_request_body_with_config() {
        let body = GenerateContentRequest::new("hello")
            .with_max_output_tokens(Some(2048))
            .with_temperature(Some(0.5))
            .with_response_mime_type("application/json")
            .into_value();

        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }
}
