//! Mock email dispatcher
//!
//! Logs messages instead of sending them. Used in development and whenever
//! the configured provider cannot be initialised.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use vg_core::errors::DomainError;
use vg_core::services::notification::{Dispatcher, OutboundMessage};
use vg_shared::utils::mask_email;

/// Mock dispatcher for development and testing
#[derive(Clone, Default)]
pub struct MockDispatcher {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
}

impl MockDispatcher {
    /// Create a new mock dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

#[async_trait]
impl Dispatcher for MockDispatcher {
    async fn send(&self, message: &OutboundMessage) -> Result<String, DomainError> {
        let recipient = mask_email(&message.recipient_address);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(recipient = %recipient, "Mock dispatcher simulating failure");
            return Err(DomainError::Delivery {
                message: "Simulated email sending failure".to_string(),
            });
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "email_service",
            provider = "mock",
            recipient = %recipient,
            subject = %message.subject,
            message_id = %message_id,
            count,
            "Mock email sent"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
