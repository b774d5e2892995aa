use crate::{error::PlannerError, schemas::SchemaHandle};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// A schema that fails to compile is reported as a mismatch of that schema.
fn compile_schema(schema_name: &str, schema_json: &Value) -> Result<JSONSchema, PlannerError> {
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema_json)
        .map_err(|err| PlannerError::SchemaMismatch {
            schema: schema_name.to_string(),
            details: format!("schema could not be compiled: {}", err),
        })
}

/// Validate a parsed payload against the strict form of a schema.
pub(crate) fn validate_structured_payload(
    schema: &SchemaHandle,
    payload: &Value,
) -> Result<(), PlannerError> {
    if !payload.is_object() {
        return Err(PlannerError::SchemaMismatch {
            schema: schema.schema_name().to_string(),
            details: "<root>: expected a JSON object".to_string(),
        });
    }

    let validator = compile_schema(schema.schema_name(), &schema.strict_schema_json())?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(PlannerError::SchemaMismatch {
            schema: schema.schema_name().to_string(),
            details: detail_str,
        });
    }

    Ok(())
}
