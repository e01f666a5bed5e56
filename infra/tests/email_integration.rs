//! End-to-end rendering and delivery through the mock provider

use std::sync::Arc;

use vg_core::domain::entities::{ContextKind, Subject};
use vg_core::services::notification::{
    CachedTemplateProvider, Dispatcher, MessageRenderer, OutboundMessage, TemplateCacheConfig,
    TemplateMessageRenderer,
};
use vg_infra::email::{MockDispatcher, StaticTemplateSource};
use vg_shared::VerificationConfig;

fn renderer(
    config: &VerificationConfig,
) -> TemplateMessageRenderer<CachedTemplateProvider<StaticTemplateSource>> {
    let templates = CachedTemplateProvider::new(
        Arc::new(StaticTemplateSource::with_defaults(config)),
        TemplateCacheConfig::from(config),
    );
    TemplateMessageRenderer::new(Arc::new(templates), config.clone())
}

#[tokio::test]
async fn test_rsvp_rendered_from_built_in_template_and_sent() {
    let config = VerificationConfig::default();
    let renderer = renderer(&config);
    let dispatcher = MockDispatcher::new();
    let subject = Subject::new("user-7", "grace", "grace@example.com").with_name("Grace", "Hopper");

    let rendered = renderer
        .render(ContextKind::Rsvp, &subject, "tok-1")
        .await
        .unwrap();
    assert!(rendered.html_body.contains("Deer Grace"));
    assert!(rendered
        .html_body
        .contains("href=\"https://deerhacks.ca/verify?code=tok-1\""));
    assert!(rendered.text_body.contains("https://deerhacks.ca/verify?code=tok-1"));

    let message = OutboundMessage::for_subject(&subject, rendered);
    assert_eq!(message.recipient_address, "grace@example.com");

    let message_id = dispatcher.send(&message).await.unwrap();
    assert!(message_id.starts_with("mock_"));
    assert_eq!(dispatcher.get_message_count(), 1);
}

#[tokio::test]
async fn test_failed_delivery_reported_as_error() {
    let config = VerificationConfig::default();
    let renderer = renderer(&config);
    let dispatcher = MockDispatcher::new();
    dispatcher.set_simulate_failure(true);
    let subject = Subject::new("user-8", "linus", "linus@example.com");

    let rendered = renderer
        .render(ContextKind::Rejection, &subject, "tok-2")
        .await
        .unwrap();
    let result = dispatcher
        .send(&OutboundMessage::for_subject(&subject, rendered))
        .await;

    assert!(result.is_err());
    assert_eq!(dispatcher.get_message_count(), 0);
}
