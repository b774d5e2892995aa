use crate::{
    schemas::{validation::validate_structured_payload, CompletionSchema, SchemaHandle},
    PlannerError, Result,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// How much structure a parsed response must show before it counts as a plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validator {
    /// Any syntactically valid JSON is accepted; missing fields render as absent
    #[default]
    Permissive,
    /// The payload must be an object matching the type's schema and required keys
    Strict,
}

impl Validator {
    /// Check a payload against `schema` according to this mode.
    pub fn check(&self, schema: &SchemaHandle, payload: &Value) -> Result<()> {
        match self {
            Validator::Permissive => Ok(()),
            Validator::Strict => validate_structured_payload(schema, payload),
        }
    }

    /// Check and deserialize a payload into its typed view
    pub fn validate<T: CompletionSchema>(&self, payload: Value) -> Result<T> {
        self.check(T::schema(), &payload)?;
        deserialize_with_path(payload)
    }
}

/// Deserialize through `serde_path_to_error` so failures name the offending field.
pub(crate) fn deserialize_with_path<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_path_to_error::deserialize(payload).map_err(|e| {
        PlannerError::Validation(format!("Field validation failed at {}: {}", e.path(), e))
    })
}
