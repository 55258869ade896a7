use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::response_schema;
use super::StructuringError;
use crate::config::AppConfig;

/// Generative-AI client abstraction (allows mocking).
///
/// `generate` returns the service's raw response text; reconciling it
/// against the schema is the caller's job.
#[async_trait]
pub trait GenerativeClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, StructuringError>;
}

/// HTTP client for the Gemini `generateContent` REST endpoint.
///
/// Every request is schema-constrained and deterministic: temperature 0,
/// JSON output, and the document schema as `responseJsonSchema`.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.model,
            &config.api_key,
            config.timeout_secs,
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Request body for `generateContent`.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseJsonSchema")]
    response_json_schema: Value,
}

/// Response body from `generateContent`, reduced to what we read.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

fn extraction_request<'a>(system: &'a str, prompt: &'a str) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part { text: system }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: prompt }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.0,
            response_mime_type: "application/json",
            response_json_schema: response_schema(),
        },
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, StructuringError> {
        let body = extraction_request(system, prompt);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    StructuringError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    StructuringError::Http(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    StructuringError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StructuringError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| StructuringError::ResponseDecoding(e.to_string()))?;

        let text: String = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(StructuringError::EmptyResponse);
        }

        tracing::debug!(response_len = text.len(), "model response received");
        Ok(text)
    }
}

/// Mock client for testing — returns a configurable response.
pub struct MockClient {
    response: String,
}

impl MockClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl GenerativeClient for MockClient {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, StructuringError> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_client_returns_configured_response() {
        let client = MockClient::new(r#"{"events": []}"#);
        let result = client.generate("system", "prompt").await.unwrap();
        assert_eq!(result, r#"{"events": []}"#);
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = GeminiClient::new("http://localhost:1234/v1beta/", "gemini-2.5-flash", "k", 60);
        assert_eq!(client.base_url, "http://localhost:1234/v1beta");
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_is_deterministic_and_schema_constrained() {
        let body = extraction_request("sys", "user prompt");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["generationConfig"]["temperature"], 0.0);
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(json["generationConfig"]["responseJsonSchema"]["properties"]["events"].is_object());

        // System instruction carries no role; the document prompt is the
        // single user turn.
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "sys");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "user prompt");
    }

    #[test]
    fn response_parsing_tolerates_missing_fields() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());

        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.candidates[0].content.as_ref().unwrap().parts[0]
                .text
                .as_deref(),
            Some("{}")
        );
    }
}
