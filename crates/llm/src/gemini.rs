use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};
use wayfarer_core::{ChatMessage, ChatModel, ChatRole, GenerationError};

use crate::config::ModelSettings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(settings: &ModelSettings) -> Result<Self, GenerationError> {
        let mut builder = Client::builder().connect_timeout(Duration::from_secs(6));
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|err| GenerationError::Transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http_client,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    fn model_id(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, messages), fields(model = %self.model, messages = messages.len()))]
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<Option<String>, GenerationError> {
        let payload = build_request_body(messages);

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message: extract_error_message(&body).unwrap_or(body),
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| GenerationError::Decode(err.to_string()))?;
        debug!(status = status.as_u16(), "gemini response received");

        Ok(extract_candidate_text(&body))
    }
}

/// System messages become `systemInstruction`; everything else goes into
/// `contents` in the order given.
fn build_request_body(messages: &[ChatMessage]) -> GenerateContentRequest<'_> {
    let system_parts = messages
        .iter()
        .filter(|message| message.role == ChatRole::System)
        .map(|message| Part {
            text: message.content.as_str(),
        })
        .collect::<Vec<_>>();

    let contents = messages
        .iter()
        .filter(|message| message.role == ChatRole::User)
        .map(|message| Content {
            role: Some("user"),
            parts: vec![Part {
                text: message.content.as_str(),
            }],
        })
        .collect::<Vec<_>>();

    GenerateContentRequest {
        system_instruction: if system_parts.is_empty() {
            None
        } else {
            Some(Content {
                role: None,
                parts: system_parts,
            })
        },
        contents,
    }
}

fn extract_candidate_text(payload: &serde_json::Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let chunks = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|value| value.as_str()))
        .collect::<Vec<_>>();

    if chunks.is_empty() {
        None
    } else {
        Some(chunks.concat())
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed
        .get("error")?
        .get("message")?
        .as_str()
        .map(ToString::to_string)
}
