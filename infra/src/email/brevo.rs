//! Brevo transactional email dispatcher
//!
//! Sends through `POST {api_base}/smtp/email` with the `api-key` header.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use vg_core::errors::DomainError;
use vg_core::services::notification::{Dispatcher, OutboundMessage};
use vg_shared::utils::mask_email;
use vg_shared::EmailConfig;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrevoEmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrevoSendEmailBody {
    pub sender: BrevoEmailAddress,
    pub to: Vec<BrevoEmailAddress>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailResponse {
    message_id: String,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Build an HTTP client for the provider
pub(crate) fn http_client(config: &EmailConfig) -> Result<reqwest::Client, InfrastructureError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(concat!("verigate/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(InfrastructureError::Http)
}

/// Dispatcher backed by the Brevo API
#[derive(Clone)]
pub struct BrevoDispatcher {
    client: reqwest::Client,
    config: EmailConfig,
}

impl BrevoDispatcher {
    /// Create a new Brevo dispatcher
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - API key or sender address missing
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if !config.has_credentials() {
            return Err(InfrastructureError::Config(
                "BREVO_API_KEY and BREVO_SENDER_EMAIL are required".to_string(),
            ));
        }

        let client = http_client(&config)?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/smtp/email", self.config.api_base.trim_end_matches('/'))
    }

    pub(crate) fn build_body(&self, message: &OutboundMessage) -> BrevoSendEmailBody {
        BrevoSendEmailBody {
            sender: BrevoEmailAddress {
                email: self.config.sender_email.clone(),
                name: non_empty(&self.config.sender_name),
            },
            to: vec![BrevoEmailAddress {
                email: message.recipient_address.clone(),
                name: non_empty(&message.recipient_name),
            }],
            subject: message.subject.clone(),
            html_content: non_empty(&message.html_body),
            text_content: non_empty(&message.text_body),
        }
    }

    async fn post(&self, body: &BrevoSendEmailBody) -> Result<String, InfrastructureError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Email(format!(
                "Brevo send failed (status={}): {}",
                status.as_u16(),
                detail
            )));
        }

        let parsed: BrevoSendEmailResponse = response.json().await?;
        Ok(parsed.message_id)
    }
}

#[async_trait]
impl Dispatcher for BrevoDispatcher {
    async fn send(&self, message: &OutboundMessage) -> Result<String, DomainError> {
        let recipient = mask_email(&message.recipient_address);
        let body = self.build_body(message);

        debug!(recipient = %recipient, "Sending email via Brevo");

        match self.post(&body).await {
            Ok(message_id) => {
                info!(
                    target: "email_service",
                    provider = "brevo",
                    recipient = %recipient,
                    message_id = %message_id,
                    "Email sent"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    target: "email_service",
                    provider = "brevo",
                    recipient = %recipient,
                    "Email send failed: {}",
                    e
                );
                Err(e.into())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "brevo"
    }
}
