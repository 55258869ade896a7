pub mod gemini;
pub mod prompt;
pub mod reconcile;
pub mod schema;

pub use gemini::*;
pub use prompt::*;
pub use reconcile::*;
pub use schema::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StructuringError {
    #[error("cannot reach the Gemini API at {0}")]
    Connection(String),

    #[error("Gemini returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("malformed Gemini response: {0}")]
    ResponseDecoding(String),

    #[error("model returned no candidate text")]
    EmptyResponse,

    #[error("model output is not valid JSON ({reason}); raw output:\n{raw}")]
    RawParse { reason: String, raw: String },
}

/// Run the full structuring pipeline for one document's raw text:
/// prompt → model → reconcile.
pub async fn structure_text<C>(
    client: &C,
    raw_text: &str,
) -> Result<StructuredOutput, StructuringError>
where
    C: GenerativeClient + ?Sized,
{
    let preview: String = raw_text.chars().take(200).collect();
    tracing::debug!(text_len = raw_text.len(), preview = %preview, "starting extraction");

    let prompt = build_extraction_prompt(raw_text);
    let response = client.generate(EXTRACTION_SYSTEM_PROMPT, &prompt).await?;

    reconcile(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn structure_text_validates_conforming_response() {
        let client = MockClient::new(
            r#"{
                "document_details": { "vessel_name": "MV Ocean Star" },
                "events": [],
                "laytime_notes": null
            }"#,
        );

        let output = structure_text(&client, "NOR tendered 06:00, MV Ocean Star")
            .await
            .unwrap();
        assert!(matches!(output, StructuredOutput::Validated(_)));
    }

    #[tokio::test]
    async fn structure_text_surfaces_raw_parse_failure() {
        let client = MockClient::new("no JSON here");
        let err = structure_text(&client, "some document text")
            .await
            .unwrap_err();
        assert!(matches!(err, StructuringError::RawParse { .. }));
    }
}
