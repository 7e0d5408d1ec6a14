pub mod github;
pub mod mail;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use github::{latest_push_message, GithubClient, GithubEvent};
pub use mail::{ContactMail, Delivery, FormRelayMailer, MailProvider, ResendMailer};
pub use openai::OpenAiProvider;

/// Failure of a single outbound call. Callers decide the fallback; nothing in
/// this crate retries.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{service} request failed: {source}")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned {status}: {detail}")]
    Status {
        service: &'static str,
        status: u16,
        detail: String,
    },
    #[error("{service} returned a malformed body: {detail}")]
    Malformed {
        service: &'static str,
        detail: String,
    },
    #[error("{service} returned no content")]
    Empty { service: &'static str },
    #[error("{service} is not configured")]
    NotConfigured { service: &'static str },
}

impl UpstreamError {
    /// HTTP status reported by the upstream, when it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn service(&self) -> &'static str {
        match self {
            Self::Network { service, .. }
            | Self::Status { service, .. }
            | Self::Malformed { service, .. }
            | Self::Empty { service }
            | Self::NotConfigured { service } => service,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmMessage {
    pub role: String,
    pub content: String,
}

impl LlmMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub model: String,
    pub system: Option<String>,
    pub messages: Vec<LlmMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl LlmRequest {
    pub fn simple(model: String, system: Option<String>, user: String) -> Self {
        Self {
            model,
            system,
            messages: vec![LlmMessage::user(user)],
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Completion text, trimmed. Never empty: empty completions surface as
    /// [`UpstreamError::Empty`].
    pub text: String,
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse, UpstreamError>;
}
