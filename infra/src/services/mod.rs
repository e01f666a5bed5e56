//! Service wiring
//!
//! Assembles the core services on the MySQL stores, the configured email
//! provider and the change queue.

use sqlx::MySqlPool;
use std::sync::Arc;

use vg_core::services::notification::{Dispatcher, TemplateSource};
use vg_core::services::{
    CachedTemplateProvider, ContextLifecycleManager, ContextReaper, TemplateCacheConfig,
    TemplateMessageRenderer, VerificationProcessor,
};
use vg_shared::AppConfig;

use crate::database::{MySqlContextRepository, MySqlSubjectRepository};
use crate::email::{create_dispatcher, create_template_source};
use crate::sync::QueueChangeNotifier;

pub type TemplateCache = CachedTemplateProvider<Box<dyn TemplateSource>>;
pub type Renderer = TemplateMessageRenderer<TemplateCache>;
pub type LifecycleManager = ContextLifecycleManager<
    MySqlContextRepository,
    MySqlSubjectRepository,
    Renderer,
    Box<dyn Dispatcher>,
>;
pub type Processor =
    VerificationProcessor<MySqlContextRepository, MySqlSubjectRepository, QueueChangeNotifier>;
pub type Reaper = ContextReaper<MySqlContextRepository>;

/// Verification service container
#[derive(Clone)]
pub struct VerificationServices {
    /// Issues and refreshes tokens
    pub lifecycle: Arc<LifecycleManager>,
    /// Consumes tokens
    pub processor: Arc<Processor>,
    /// Periodic purge of spent records
    pub reaper: Arc<Reaper>,
    /// Shared template cache, exposed for explicit invalidation
    pub templates: Arc<TemplateCache>,
}

impl VerificationServices {
    /// Wire every service onto one pool
    pub fn from_pool(pool: MySqlPool, config: &AppConfig, notifier: QueueChangeNotifier) -> Self {
        let contexts = Arc::new(MySqlContextRepository::new(pool.clone()));
        let subjects = Arc::new(MySqlSubjectRepository::new(pool));

        let templates = Arc::new(CachedTemplateProvider::new(
            Arc::new(create_template_source(&config.email, &config.verification)),
            TemplateCacheConfig::from(&config.verification),
        ));
        let renderer = Arc::new(TemplateMessageRenderer::new(
            templates.clone(),
            config.verification.clone(),
        ));
        let dispatcher = Arc::new(create_dispatcher(&config.email));

        tracing::info!(
            provider = dispatcher.provider_name(),
            "Verification services wired"
        );

        Self {
            lifecycle: Arc::new(ContextLifecycleManager::new(
                contexts.clone(),
                subjects.clone(),
                renderer,
                dispatcher,
            )),
            processor: Arc::new(VerificationProcessor::new(
                contexts.clone(),
                subjects,
                Arc::new(notifier),
            )),
            reaper: Arc::new(ContextReaper::new(contexts, config.reaper.clone())),
            templates,
        }
    }
}
