use std::sync::Arc;

use folio_provider::{ContactMail, FormRelayMailer, MailProvider, ResendMailer, UpstreamError};
use folio_schema::{ContactRequest, ContactResponse};

use crate::config::MailConfig;

pub const NO_PROVIDER_ERROR: &str = "No email provider configured.";

/// Routes contact-form submissions to the configured mail provider.
#[derive(Clone)]
pub struct ContactService {
    provider: Option<Arc<dyn MailProvider>>,
    from: String,
    to: String,
}

/// Response body plus the HTTP status it goes out with.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactOutcome {
    pub status: u16,
    pub body: ContactResponse,
}

impl ContactService {
    /// Resend wins when its key is set, then the form relay. With neither,
    /// submissions are rejected without any outbound call.
    pub fn from_config(mail: &MailConfig) -> Self {
        let provider: Option<Arc<dyn MailProvider>> = if !mail.resend_api_key.trim().is_empty() {
            Some(Arc::new(ResendMailer::new(
                &mail.resend_api_key,
                &mail.resend_api_base,
            )))
        } else if !mail.form_endpoint.trim().is_empty() {
            Some(Arc::new(FormRelayMailer::new(&mail.form_endpoint)))
        } else {
            None
        };

        Self {
            provider,
            from: mail.from.clone(),
            to: mail.to.clone(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn MailProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    pub async fn submit(&self, request: ContactRequest) -> ContactOutcome {
        let Some(provider) = self.provider.as_ref() else {
            tracing::error!("Contact form submitted but no email provider is configured");
            return ContactOutcome {
                status: 500,
                body: ContactResponse {
                    ok: false,
                    provider: None,
                    id: None,
                    error: Some(NO_PROVIDER_ERROR.to_string()),
                },
            };
        };

        let mail = ContactMail {
            from: self.from.clone(),
            to: self.to.clone(),
            name: request.name,
            email: request.email,
            message: request.message,
        };

        match provider.send(&mail).await {
            Ok(delivery) => {
                tracing::info!("Contact message delivered via {}", delivery.provider);
                ContactOutcome {
                    status: 200,
                    body: ContactResponse {
                        ok: true,
                        provider: Some(delivery.provider.to_string()),
                        id: delivery.id,
                        error: None,
                    },
                }
            }
            Err(e) => {
                tracing::error!("Contact delivery via {} failed: {e}", provider.name());
                ContactOutcome {
                    status: 500,
                    body: ContactResponse {
                        ok: false,
                        provider: Some(provider.name().to_string()),
                        id: None,
                        error: failure_detail(provider.name(), &e),
                    },
                }
            }
        }
    }
}

// A relay that answered with a status reports only ok/not ok. Transport
// failures and every Resend error carry their message.
fn failure_detail(provider: &str, err: &UpstreamError) -> Option<String> {
    match err {
        UpstreamError::Status { .. } if provider == "formspree" => None,
        _ => Some(err.to_string()),
    }
}
