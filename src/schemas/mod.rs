pub mod schema;
pub(crate) mod validation;
pub mod validator;

pub use schema::{apply_doc_comments, schema_type_name, CompletionSchema, SchemaHandle};
pub use validator::Validator;
