//! Template sources: the Brevo SMTP template list and a built-in fallback

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use vg_core::domain::entities::Template;
use vg_core::errors::DomainError;
use vg_core::services::notification::TemplateSource;
use vg_shared::{EmailConfig, VerificationConfig};

use super::brevo::http_client;
use crate::InfrastructureError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrevoTemplateList {
    #[serde(default)]
    pub templates: Vec<BrevoTemplateOverview>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrevoTemplateOverview {
    pub id: i64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html_content: String,
}

impl From<BrevoTemplateOverview> for Template {
    fn from(overview: BrevoTemplateOverview) -> Self {
        Template::new(overview.id, overview.subject, overview.html_content)
    }
}

/// Template source reading `GET {api_base}/smtp/templates`
pub struct BrevoTemplateSource {
    client: reqwest::Client,
    config: EmailConfig,
}

impl BrevoTemplateSource {
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "BREVO_API_KEY is required to fetch templates".to_string(),
            ));
        }

        let client = http_client(&config)?;
        Ok(Self { client, config })
    }

    async fn fetch(&self) -> Result<BrevoTemplateList, InfrastructureError> {
        let url = format!("{}/smtp/templates", self.config.api_base.trim_end_matches('/'));
        let response = self
            .client
            .get(url)
            .header("api-key", &self.config.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfrastructureError::Email(format!(
                "Brevo template list failed (status={})",
                status.as_u16()
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TemplateSource for BrevoTemplateSource {
    async fn fetch_all(&self) -> Result<Vec<Template>, DomainError> {
        let list = self.fetch().await?;
        debug!(count = list.templates.len(), "Fetched Brevo templates");
        Ok(list.templates.into_iter().map(Template::from).collect())
    }
}

/// Fixed in-process templates for running without a provider account
pub struct StaticTemplateSource {
    templates: Vec<Template>,
}

impl StaticTemplateSource {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Plain RSVP and rejection templates under the configured ids
    pub fn with_defaults(config: &VerificationConfig) -> Self {
        Self::new(vec![
            Template::new(
                config.rsvp_template_id,
                "You're invited to DeerHacks!",
                "<p>Deer {first_name},</p>\
                 <p>Congratulations! You have been selected to participate in DeerHacks.</p>\
                 <p>RSVP here within 5 days: <a href=\"https://{rsvp_link}\">{rsvp_link}</a></p>\
                 <p>Happy Hacking,<br>The DeerHacks Team</p>",
            ),
            Template::new(
                config.rejection_template_id,
                "Your DeerHacks application",
                "<p>Deer {first_name},</p>\
                 <p>After careful review, we are unable to offer you an acceptance as a Hacker at this time.</p>\
                 <p>Best Regards,<br>The DeerHacks Team</p>",
            ),
        ])
    }
}

#[async_trait]
impl TemplateSource for StaticTemplateSource {
    async fn fetch_all(&self) -> Result<Vec<Template>, DomainError> {
        Ok(self.templates.clone())
    }
}
