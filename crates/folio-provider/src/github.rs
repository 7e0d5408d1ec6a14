use serde::Deserialize;

use crate::UpstreamError;

const SERVICE: &str = "github";

/// Reader for the public events feed of the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
    user_agent: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GithubEvent {
    #[serde(rename = "type")]
    pub kind: String,
    /// RFC 3339 timestamp, e.g. `2025-10-14T18:03:11Z`.
    pub created_at: String,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Vec<PushCommit>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PushCommit {
    #[serde(default)]
    pub message: String,
}

impl GithubEvent {
    /// `YYYY-MM-DD` prefix of `created_at`.
    pub fn day(&self) -> Option<&str> {
        self.created_at.get(..10)
    }
}

impl GithubClient {
    pub fn new(api_base: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: None,
            user_agent: user_agent.into(),
        }
    }

    /// Authenticated requests get a higher rate limit. Empty tokens are ignored.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub async fn public_events(&self, user: &str) -> Result<Vec<GithubEvent>, UpstreamError> {
        let url = format!(
            "{}/users/{}/events/public",
            self.api_base,
            urlencoding::encode(user)
        );

        let mut req = self
            .client
            .get(url)
            .header("user-agent", &self.user_agent)
            .header("accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            req = req.header("authorization", format!("token {token}"));
        }

        let resp = req.send().await.map_err(|source| UpstreamError::Network {
            service: SERVICE,
            source,
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|source| UpstreamError::Network {
            service: SERVICE,
            source,
        })?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: status.as_u16(),
                detail: text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| UpstreamError::Malformed {
            service: SERVICE,
            detail: e.to_string(),
        })
    }
}

/// First commit message of the most recent push event. Only the newest
/// `PushEvent` is considered; an empty push yields `None`.
pub fn latest_push_message(events: &[GithubEvent]) -> Option<&str> {
    events
        .iter()
        .find(|e| e.kind == "PushEvent")?
        .payload
        .commits
        .first()
        .map(|c| c.message.as_str())
        .filter(|m| !m.trim().is_empty())
}
