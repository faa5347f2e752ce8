//! OpenAI-compatible chat completion client
//!
//! One request, one answer: posts `{model, messages, temperature}` to the
//! configured endpoint and returns `choices[0].message.content`.
//! Every failure comes back as an [`Error`]; nothing is retried.
//!
//! @module ai/chat

use crate::core::config::UpstreamConfig;
use crate::core::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

/// Chat completion response, only the parts we read
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// =============================================================================
// CLIENT
// =============================================================================

/// Chat completion client (one pooled HTTP client per instance)
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl ChatClient {
    /// Create a client for the given endpoint and optional bearer token
    pub fn new(api_url: &str, api_key: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fabao/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.map(str::to_string),
        })
    }

    /// Create a client from the upstream section of the configuration
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        Self::new(&config.api_url, config.api_key.as_deref())
    }

    /// Send a single user prompt and return the reply text
    pub async fn complete(&self, prompt: &str, model: &str, temperature: f32) -> Result<String> {
        self.complete_messages(&[ChatMessage::user(prompt)], model, temperature)
            .await
    }

    /// Send a full message list and return the reply text
    pub async fn complete_messages(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f32,
    ) -> Result<String> {
        let request = CompletionRequest {
            model,
            messages,
            temperature,
        };

        debug!(
            "Sending chat completion: model={} messages={} url={}",
            model,
            messages.len(),
            self.api_url
        );

        let mut req = self.client.post(&self.api_url).json(&request);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| {
            warn!("API request failed: {}", e);
            if e.is_timeout() {
                Error::UpstreamTimeout {
                    message: e.to_string(),
                }
            } else {
                Error::UpstreamError {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Error::UpstreamError {
            message: format!("Failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            warn!("Chat API error: {} - {}", status, body);
            return Err(Error::UpstreamError {
                message: format!("{} - {}", status, body),
            });
        }

        let text = extract_content(&body)?;
        debug!("Received chat completion ({} chars)", text.len());
        Ok(text)
    }
}

/// Pull `choices[0].message.content` out of a response body
fn extract_content(body: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        warn!("Failed to parse API response: {}", e);
        Error::UpstreamFormat {
            message: "Invalid JSON response".to_string(),
        }
    })?;

    let response: CompletionResponse =
        serde_json::from_value(value).map_err(|e| {
            warn!("Failed to extract response: {}", e);
            Error::UpstreamFormat {
                message: "Invalid response format".to_string(),
            }
        })?;

    if let Some(error) = response.error.filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .or_else(|| error.as_str().map(str::to_string))
            .unwrap_or_else(|| error.to_string());
        return Err(Error::UpstreamError { message });
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| {
            warn!("Failed to extract response: no choices[0].message.content");
            Error::UpstreamFormat {
                message: "Invalid response format".to_string(),
            }
        })
}

/// Legacy text form of an upstream failure, `"Error: <reason>"`
pub fn error_sentinel(err: &Error) -> String {
    format!("Error: {}", err.reason())
}
