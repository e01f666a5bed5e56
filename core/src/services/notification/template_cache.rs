//! Time-boxed template cache in front of a [`TemplateSource`]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::entities::Template;
use crate::errors::DomainError;

use super::traits::{TemplateProvider, TemplateSource};

/// Configuration for the template cache
#[derive(Debug, Clone)]
pub struct TemplateCacheConfig {
    /// How long a fetched template list is served before refetching
    pub ttl: Duration,
}

impl Default for TemplateCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(900),
        }
    }
}

impl From<&vg_shared::VerificationConfig> for TemplateCacheConfig {
    fn from(config: &vg_shared::VerificationConfig) -> Self {
        Self {
            ttl: Duration::from_secs(config.template_cache_ttl_seconds),
        }
    }
}

struct CachedTemplates {
    templates: Vec<Template>,
    fetched_at: Instant,
}

/// Template provider that caches the full template list
///
/// - Fresh cache: lookups are served without touching the source.
/// - Empty, stale or invalidated cache: one fetch from the source.
/// - Fetch failure with a stale list on hand: the stale list is served.
pub struct CachedTemplateProvider<S: TemplateSource> {
    source: Arc<S>,
    config: TemplateCacheConfig,
    cache: RwLock<Option<CachedTemplates>>,
}

impl<S: TemplateSource> CachedTemplateProvider<S> {
    pub fn new(source: Arc<S>, config: TemplateCacheConfig) -> Self {
        Self {
            source,
            config,
            cache: RwLock::new(None),
        }
    }

    fn is_fresh(&self, cached: &CachedTemplates) -> bool {
        cached.fetched_at.elapsed() < self.config.ttl
    }

    fn lookup(templates: &[Template], id: i64) -> Result<Template, DomainError> {
        templates
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("template with id {}", id)))
    }

    async fn refresh_and_lookup(&self, id: i64) -> Result<Template, DomainError> {
        let mut cache = self.cache.write().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(cached) = cache.as_ref().filter(|c| self.is_fresh(c)) {
            return Self::lookup(&cached.templates, id);
        }

        match self.source.fetch_all().await {
            Ok(templates) if templates.is_empty() => Err(DomainError::Render {
                message: "No templates available".to_string(),
            }),
            Ok(templates) => {
                info!(count = templates.len(), "Template cache refreshed");
                let result = Self::lookup(&templates, id);
                *cache = Some(CachedTemplates {
                    templates,
                    fetched_at: Instant::now(),
                });
                result
            }
            Err(e) => match cache.as_ref() {
                Some(stale) => {
                    warn!("Template refresh failed, serving stale templates: {}", e);
                    Self::lookup(&stale.templates, id)
                }
                None => Err(DomainError::Render {
                    message: format!("Failed to fetch templates: {}", e),
                }),
            },
        }
    }
}

#[async_trait]
impl<S: TemplateSource> TemplateProvider for CachedTemplateProvider<S> {
    async fn get_by_id(&self, id: i64) -> Result<Template, DomainError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref().filter(|c| self.is_fresh(c)) {
                debug!(template_id = id, "Template cache hit");
                return Self::lookup(&cached.templates, id);
            }
        }

        self.refresh_and_lookup(id).await
    }

    async fn invalidate(&self) {
        *self.cache.write().await = None;
        debug!("Template cache invalidated");
    }
}
