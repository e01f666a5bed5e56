//! Default message renderer
//!
//! Signup mail is built in. RSVP and rejection mail use provider-hosted
//! templates with `{first_name}` and `{rsvp_link}` placeholders.

use async_trait::async_trait;
use std::sync::Arc;

use vg_shared::VerificationConfig;

use crate::domain::entities::{ContextKind, Subject};
use crate::errors::DomainError;

use super::traits::{MessageRenderer, TemplateProvider};
use super::types::RenderedMessage;

const SIGNUP_SUBJECT: &str = "[Action Required] Verify email to access DeerHacks dashboard";

/// Renders verification mail from built-in bodies and provider templates
pub struct TemplateMessageRenderer<P: TemplateProvider> {
    templates: Arc<P>,
    config: VerificationConfig,
}

impl<P: TemplateProvider> TemplateMessageRenderer<P> {
    pub fn new(templates: Arc<P>, config: VerificationConfig) -> Self {
        Self { templates, config }
    }

    /// Link the recipient follows to verify
    pub fn verify_link(&self, token: &str) -> String {
        format!("{}?code={}", self.config.verify_base_url, token)
    }

    fn render_signup(&self, first_name: &str, link: &str) -> RenderedMessage {
        let button = format!(
            r#"<a href="{link}" style="background-color: white; color: #181818; padding: 1rem 2rem; font-weight: 600; text-decoration: none; border-radius: 0.5rem;">Verify Email</a>"#
        );
        let html_body = format!(
            r#"<div style="background: #212121; padding: 3rem 1rem 1rem;">
  <div style="background: #181818; color: white; max-width: 500px; margin: auto; padding: 1rem; border-radius: 1rem;">
    <h1 style="color: white;">Deer {first_name},</h1>
    <h2 style="color: white;">Thanks for creating an account with us at DeerHacks!</h2>
    <p style="color: white;">Please click the button below or this link directly: <a href="{link}" style="color: white;">{link}</a> to verify your email. The link will expire within 24 hours of receiving this email.</p>
    <div style="display: grid; padding: 3rem 0;">{button}</div>
    <p style="color: white;">Happy Hacking,<br>The DeerHacks Team</p>
  </div>
</div>"#
        );
        let text_body = format!(
            "Deer {first_name},\n\n\
             Thanks for creating an account with us at DeerHacks!\n\n\
             Please click the link below to verify your email. The link will expire within 24 hours of receiving this email.\n\n\
             {link}\n\n\
             Happy Hacking,\n\n\
             DeerHacks Team"
        );

        RenderedMessage {
            subject: SIGNUP_SUBJECT.to_string(),
            html_body,
            text_body,
        }
    }

    async fn render_rsvp(&self, first_name: &str, link: &str) -> Result<RenderedMessage, DomainError> {
        let template = self.fetch(self.config.rsvp_template_id).await?;
        let html_body = unescape_html(&template.html_content)
            .replace("{first_name}", first_name)
            .replace("{rsvp_link}", link.trim_start_matches("https://"));
        let text_body = format!(
            "Deer {first_name},\n\n\
             Congratulations! You have been selected to participate in DeerHacks.\n\n\
             Please click the link below to RSVP. The link will expire within 5 days of receiving this email.\n\n\
             {link}\n\n\
             Happy Hacking,\n\n\
             DeerHacks Team"
        );

        Ok(RenderedMessage {
            subject: template.subject,
            html_body,
            text_body,
        })
    }

    async fn render_rejection(&self, first_name: &str) -> Result<RenderedMessage, DomainError> {
        let template = self.fetch(self.config.rejection_template_id).await?;
        let html_body = unescape_html(&template.html_content).replace("{first_name}", first_name);
        let text_body = format!(
            "Deer {first_name},\n\n\
             After careful review, we regret to inform you that we are unable to offer you an acceptance as a Hacker at this time. \
             However, we encourage you to apply again next year and to continue seeking opportunities within our community.\n\n\
             If you have any questions or concerns, do not hesitate to contact us at hello@deerhacks.ca.\n\n\
             Best Regards,\n\n\
             DeerHacks Team"
        );

        Ok(RenderedMessage {
            subject: template.subject,
            html_body,
            text_body,
        })
    }

    async fn fetch(&self, id: i64) -> Result<crate::domain::entities::Template, DomainError> {
        self.templates.get_by_id(id).await.map_err(|e| match e {
            DomainError::Render { .. } => e,
            other => DomainError::Render {
                message: format!("Failed to fetch template: {}", other),
            },
        })
    }
}

#[async_trait]
impl<P: TemplateProvider> MessageRenderer for TemplateMessageRenderer<P> {
    async fn render(
        &self,
        kind: ContextKind,
        subject: &Subject,
        token: &str,
    ) -> Result<RenderedMessage, DomainError> {
        let first_name = subject.display_first_name();
        let link = self.verify_link(token);

        match kind {
            ContextKind::Signup => Ok(self.render_signup(first_name, &link)),
            ContextKind::Rsvp => self.render_rsvp(first_name, &link).await,
            ContextKind::Rejection => self.render_rejection(first_name).await,
        }
    }
}

/// Decode the entity escapes template providers apply to stored HTML
///
/// Named and numeric references are decoded in a single pass, so `&amp;lt;`
/// becomes `&lt;`, not `<`.
pub fn unescape_html(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}
