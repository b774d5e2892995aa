use async_trait::async_trait;

use crate::{error::Result, types::RawModelResponse};

/// Everything one text-generation call needs, already resolved by the caller.
#[derive(Debug, Clone, Copy)]
pub struct GenerationCall<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub prompt: &'a str,
}

/// A hosted text-generation service
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    /// Send one prompt and return whatever came back, unparsed.
    async fn generate(&self, call: GenerationCall<'_>) -> Result<RawModelResponse>;
}
