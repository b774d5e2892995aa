use std::time::Duration;

use crate::{
    error::{PlannerError, Result},
    schemas::Validator,
    services::gemini_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
    types::request::DEFAULT_MODEL,
};

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const TIMEOUT_ENV: &str = "GEMINI_TIMEOUT_SECS";

/// Settings owned by the caller and passed through to the text-generation call
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub api_key: Option<String>,
    pub default_model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub validator: Validator,
    pub json_mode: bool,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self {
            api_key: None,
            default_model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            validator: Validator::Permissive,
            json_mode: false,
            max_output_tokens: None,
            temperature: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
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

    /// Read settings from the process environment.
    ///
    /// A missing API key is not an error here; generation reports it as a
    /// missing credential instead.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        config.api_key = non_empty(API_KEY_ENV);
        if let Some(model) = non_empty(MODEL_ENV) {
            config.default_model = model;
        }
        if let Some(base_url) = non_empty(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        if let Some(timeout) = non_empty(TIMEOUT_ENV) {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                PlannerError::Config(format!(
                    "{TIMEOUT_ENV} must be a whole number of seconds, got `{timeout}`"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}
