use std::any::{type_name, TypeId};

use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    schemas::{validator::deserialize_with_path, CompletionSchema, SchemaHandle},
};

/// Parsed model output tagged with the schema it is expected to follow.
///
/// The value is kept exactly as parsed; typed views are produced on demand.
#[derive(Clone, Debug)]
pub struct StructuredPayload {
    schema: SchemaHandle,
    value: Value,
}

impl StructuredPayload {
    pub fn new(schema: SchemaHandle, value: Value) -> Self {
        Self { schema, value }
    }

    /// Wrap a value for the schema of `T`.
    pub fn for_schema<T: CompletionSchema>(value: Value) -> Self {
        Self::new(T::schema().clone(), value)
    }

    pub fn schema(&self) -> &SchemaHandle {
        &self.schema
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn deserialize<T>(&self) -> Result<T>
    where
        T: CompletionSchema,
    {
        deserialize_structured_response::<T>(&self.value, &self.schema)
    }
}

impl PartialEq for StructuredPayload {
    fn eq(&self, other: &Self) -> bool {
        self.schema.type_id() == other.schema.type_id() && self.value == other.value
    }
}

pub fn deserialize_structured_response<T>(payload: &Value, schema: &SchemaHandle) -> Result<T>
where
    T: CompletionSchema,
{
    ensure_schema_matches::<T>(schema)?;
    if !payload.is_object() {
        return Err(PlannerError::Validation(format!(
            "`{}` payload is not a JSON object",
            schema.schema_name()
        )));
    }

    deserialize_with_path(payload.clone()).map_err(|err| {
        PlannerError::Validation(format!(
            "failed to read `{}` payload: {}",
            schema.schema_name(),
            err
        ))
    })
}

fn ensure_schema_matches<T: 'static>(schema: &SchemaHandle) -> Result<()> {
    let expected = TypeId::of::<T>();
    if schema.type_id() != expected {
        return Err(PlannerError::Validation(format!(
            "schema `{}` does not match target type `{}`",
            schema.schema_name(),
            type_name::<T>(),
        )));
    }
    Ok(())
}
