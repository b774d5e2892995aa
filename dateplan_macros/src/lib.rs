mod completion_schema;
mod schema_extraction;

use proc_macro::TokenStream;

/// Derives a cached `CompletionSchema` implementation for a response type.
///
/// Accepts optional `name`, `description` and `required` arguments. `required`
/// is a comma separated list of top-level fields that strict validation
/// insists on, e.g. `#[completion_schema(required = "title, timeline")]`.
#[proc_macro_attribute]
pub fn completion_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    completion_schema::completion_schema(attr, item)
}
