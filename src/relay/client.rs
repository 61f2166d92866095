//! Request forwarding and reply extraction.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::error;

use crate::error::{DeckhandError, Result};
use crate::relay::status::{StatusEmitter, StatusSink};

/// Reply returned when the configured response field is absent.
const NO_RESPONSE_FALLBACK: &str = "No response from n8n.";

/// Relay configuration supplied by the host.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Webhook URL of the workflow. Empty means unconfigured.
    pub url: String,
    /// Bearer token sent in the Authorization header.
    pub bearer_token: String,
    /// Field name the workflow expects the user input in.
    pub input_field: String,
    /// Field name the workflow returns the response in.
    pub response_field: String,
    /// Minimum interval between status emissions.
    pub emit_interval: Duration,
    /// Enable or disable status emissions.
    pub enable_status: bool,
    /// Request timeout. Workflows can run for minutes, so this is long.
    pub timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            bearer_token: String::new(),
            input_field: "chatInput".to_string(),
            response_field: "output".to_string(),
            emit_interval: Duration::from_secs(2),
            enable_status: true,
            timeout: Duration::from_secs(300),
        }
    }
}

/// A single chat message in the host's conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Typed request context passed by the host.
///
/// Carries the identifiers directly instead of having the adapter dig
/// them out of host internals.
#[derive(Debug, Clone, Default)]
pub struct RelayContext {
    pub session_id: Option<String>,
    pub message_id: Option<String>,
}

impl RelayContext {
    /// Session identifier sent to the workflow, with a fixed fallback.
    fn session_id(&self) -> &str {
        self.session_id.as_deref().unwrap_or("default_session")
    }
}

/// Forwards chat messages to the workflow webhook and relays replies.
///
/// Every failure is returned to the host as a plain reply string; the
/// adapter never panics the host or retries on its own. One client
/// serves one request at a time: the embedded status limiter is not
/// safe for concurrent reuse across simultaneous requests.
pub struct RelayClient {
    config: RelayConfig,
    http: reqwest::Client,
    emitter: StatusEmitter,
}

impl RelayClient {
    /// Build a client from the host's configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be constructed.
    pub fn new(config: RelayConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let emitter = StatusEmitter::new(config.emit_interval, config.enable_status);

        Ok(Self {
            config,
            http,
            emitter,
        })
    }

    /// Forward the last inbound message and return the workflow's reply.
    ///
    /// On success the reply is also appended to `messages` as an
    /// assistant message. On failure a formatted error string is
    /// returned instead, a terminal error status is emitted, and
    /// `messages` is left untouched. No retries.
    pub async fn forward(
        &mut self,
        ctx: &RelayContext,
        messages: &mut Vec<ChatMessage>,
        sink: Option<&dyn StatusSink>,
    ) -> String {
        if self.config.url.is_empty() {
            return "Error: relay url is not configured".to_string();
        }

        self.emitter
            .emit(sink, "info", "Calling n8n workflow...", false)
            .await;

        let Some(question) = messages.last().map(|m| m.content.clone()) else {
            let error_msg = "No messages found in the request body";
            self.emitter.emit(sink, "error", error_msg, true).await;
            return error_msg.to_string();
        };

        let reply = match self.call_webhook(ctx.session_id(), &question).await {
            Ok(reply) => reply,
            Err(e) => {
                let error_msg = match e {
                    DeckhandError::Http { status, body } => {
                        format!("HTTP Error {}: {}", status, body)
                    }
                    other => format!("Error during sequence execution: {}", other),
                };
                error!("{}", error_msg);
                self.emitter.emit(sink, "error", &error_msg, true).await;
                return error_msg;
            }
        };

        messages.push(ChatMessage::assistant(reply.clone()));
        self.emitter.emit(sink, "info", "Complete", true).await;

        reply
    }

    /// One POST to the webhook; no retries.
    async fn call_webhook(&self, session_id: &str, question: &str) -> Result<String> {
        let mut payload = serde_json::Map::new();
        payload.insert("sessionId".to_string(), json!(session_id));
        payload.insert(self.config.input_field.clone(), json!(question));

        let response = self
            .http
            .post(&self.config.url)
            .bearer_auth(&self.config.bearer_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DeckhandError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        Ok(extract_reply(value, &self.config.response_field))
    }
}

/// Pull the reply text out of the workflow's JSON response.
///
/// n8n often wraps the response object in a single-element array;
/// unwrap it before looking up the field. A missing field yields the
/// fixed fallback; a non-string value is rendered as JSON.
fn extract_reply(value: Value, response_field: &str) -> String {
    let object = match value {
        Value::Array(mut items) if !items.is_empty() => items.remove(0),
        other => other,
    };

    match object.get(response_field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => NO_RESPONSE_FALLBACK.to_string(),
    }
}
