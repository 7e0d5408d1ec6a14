use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::UpstreamError;

/// A contact-form message on its way out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactMail {
    pub from: String,
    pub to: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactMail {
    pub fn subject(&self) -> String {
        format!(
            "Portfolio Contact: {}",
            self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("No name")
        )
    }

    /// HTML body. Angle brackets in the message are escaped and newlines
    /// become `<br/>`.
    pub fn html(&self) -> String {
        let or_na = |v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.is_empty())
                .map(escape_angle_brackets)
                .unwrap_or_else(|| "(n/a)".to_string())
        };
        let message = escape_angle_brackets(self.message.as_deref().unwrap_or_default())
            .replace('\n', "<br/>");

        format!(
            "<div style=\"font-family: sans-serif\">\n  \
             <h2>New message from portfolio</h2>\n  \
             <p><strong>Name:</strong> {}<br/>\n  \
             <strong>Email:</strong> {}<br/></p>\n  \
             <p>{}</p>\n\
             </div>",
            or_na(&self.name),
            or_na(&self.email),
            message
        )
    }
}

fn escape_angle_brackets(raw: &str) -> String {
    raw.replace('<', "&lt;").replace('>', "&gt;")
}

/// Successful hand-off to a mail provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub provider: &'static str,
    pub id: Option<String>,
}

#[async_trait]
pub trait MailProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn send(&self, mail: &ContactMail) -> Result<Delivery, UpstreamError>;
}

// ---------------------------------------------------------------------------
// Resend (transactional email API)
// ---------------------------------------------------------------------------

const RESEND: &str = "resend";

#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: String,
    html: String,
}

#[derive(Deserialize)]
struct ResendAccepted {
    #[serde(default)]
    id: Option<String>,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MailProvider for ResendMailer {
    fn name(&self) -> &'static str {
        RESEND
    }

    async fn send(&self, mail: &ContactMail) -> Result<Delivery, UpstreamError> {
        let payload = ResendPayload {
            from: &mail.from,
            to: vec![mail.to.as_str()],
            subject: mail.subject(),
            html: mail.html(),
        };

        let resp = self
            .client
            .post(format!("{}/emails", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|source| UpstreamError::Network {
                service: RESEND,
                source,
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|source| UpstreamError::Network {
            service: RESEND,
            source,
        })?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: RESEND,
                status: status.as_u16(),
                detail: text,
            });
        }

        let accepted: ResendAccepted =
            serde_json::from_str(&text).map_err(|e| UpstreamError::Malformed {
                service: RESEND,
                detail: e.to_string(),
            })?;
        Ok(Delivery {
            provider: RESEND,
            id: accepted.id,
        })
    }
}

// ---------------------------------------------------------------------------
// Form relay (Formspree-style webhook)
// ---------------------------------------------------------------------------

const FORMSPREE: &str = "formspree";

#[derive(Debug, Clone)]
pub struct FormRelayMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl FormRelayMailer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl MailProvider for FormRelayMailer {
    fn name(&self) -> &'static str {
        FORMSPREE
    }

    async fn send(&self, mail: &ContactMail) -> Result<Delivery, UpstreamError> {
        let body = serde_json::json!({
            "name": mail.name,
            "email": mail.email,
            "message": mail.message,
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|source| UpstreamError::Network {
                service: FORMSPREE,
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: FORMSPREE,
                status: status.as_u16(),
                detail: resp.text().await.unwrap_or_default(),
            });
        }

        Ok(Delivery {
            provider: FORMSPREE,
            id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_defaults_to_no_name() {
        let mail = ContactMail::default();
        assert_eq!(mail.subject(), "Portfolio Contact: No name");

        let mail = ContactMail {
            name: Some("Riley".into()),
            ..Default::default()
        };
        assert_eq!(mail.subject(), "Portfolio Contact: Riley");
    }

    #[test]
    fn html_escapes_message_and_breaks_lines() {
        let mail = ContactMail {
            message: Some("<script>x</script>\nsecond line".into()),
            ..Default::default()
        };
        let html = mail.html();
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;<br/>second line"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<strong>Name:</strong> (n/a)"));
        assert!(html.contains("<strong>Email:</strong> (n/a)"));
    }

    #[test]
    fn provider_names() {
        assert_eq!(ResendMailer::new("k", "https://api.resend.com").name(), "resend");
        assert_eq!(FormRelayMailer::new("https://formspree.io/f/x").name(), "formspree");
    }
}
