//! Gemini recipe backend
//!
//! Calls the Generative Language `generateContent` endpoint with a JSON
//! response schema so the model answers with a bare recipe array.
//!
//! # API Reference
//! - Endpoint: `{endpoint}/models/{model}:generateContent`
//! - Auth: `x-goog-api-key` header

use super::backend::{recipe_prompt, response_schema, BackendError, RecipeBackend};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Gemini client
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a client for `model` at `endpoint` (e.g.
    /// `https://generativelanguage.googleapis.com/v1beta`)
    pub fn new(
        api_key: String,
        model: String,
        endpoint: String,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            model,
            endpoint,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl RecipeBackend for GeminiClient {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate_recipe(&self, target_hex: &str) -> Result<String, BackendError> {
        debug!(target_hex, model = %self.model, "Requesting recipe from Gemini");

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": recipe_prompt(target_hex) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        });

        let response = self
            .http_client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Network(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(format!("Failed to parse Gemini response: {}", e)))?;

        envelope.recipe_text()
    }
}

/// Build an [`BackendError::Api`] from an error status and body
///
/// Gemini error bodies look like
/// `{"error": {"code": 403, "message": "...", "status": "PERMISSION_DENIED"}}`;
/// the status name is kept in the message so it can be classified.
fn api_error(status: u16, body: &str) -> BackendError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(name) => format!("{}: {}", name, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) if body.trim().is_empty() => "empty error body".to_string(),
        Err(_) => body.trim().to_string(),
    };
    BackendError::Api { status, message }
}

// ============================================================================
// Gemini API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    status: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn recipe_text(self) -> Result<String, BackendError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(BackendError::Empty(format!("prompt blocked: {}", reason)));
        }

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(BackendError::Empty("no candidates returned".to_string()));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(BackendError::Empty(format!(
                "candidate has no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}
