//! Reconciles the model's raw response against the document schema.
//!
//! Schema-constrained generation is usually reliable but not guaranteed:
//! the model can emit output that is valid JSON yet violates a type
//! constraint (a string where a number is expected). Rather than discard a
//! usable response over that, schema failures fall back to the
//! unconstrained JSON mapping. Only when the response is not JSON at all
//! does reconciliation fail.

use serde::Serialize;
use serde_json::{Map, Value};

use super::schema::StructuredDocument;
use super::StructuringError;

/// Outcome of reconciling one model response: the fully validated document,
/// or the raw JSON mapping when schema coercion failed. Both serialize to
/// the plain document mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredOutput {
    Validated(StructuredDocument),
    Raw(Map<String, Value>),
}

/// Coerce the raw response text into a [`StructuredOutput`].
///
/// State machine per document: typed parse → `Validated`; schema mismatch →
/// generic JSON parse → `Raw`; not JSON → error embedding the raw text so
/// the failure is diagnosable without re-querying the service.
pub fn reconcile(raw: &str) -> Result<StructuredOutput, StructuringError> {
    let body = strip_code_fences(raw);

    match serde_json::from_str::<StructuredDocument>(body) {
        Ok(document) => Ok(StructuredOutput::Validated(document)),
        Err(schema_error) => {
            tracing::warn!(
                error = %schema_error,
                "schema validation failed, falling back to raw JSON"
            );
            match serde_json::from_str::<Map<String, Value>>(body) {
                Ok(mapping) => Ok(StructuredOutput::Raw(mapping)),
                Err(parse_error) => Err(StructuringError::RawParse {
                    reason: parse_error.to_string(),
                    raw: raw.to_string(),
                }),
            }
        }
    }
}

/// Strip a markdown code fence if the model wrapped its JSON in one.
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}
