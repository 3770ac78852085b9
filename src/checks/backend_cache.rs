//! Memcache/Redis cache backend check.

use std::sync::Arc;

use crate::check::{AuditReason, Check, CheckContext, CheckDefinition, Severity};
use crate::environment::SettingsProvider;
use crate::messages::MessageType;

pub const ID: &str = "backend_cache_settings";

const DATABASE_BACKEND: &str = "cache.backend.database";

pub fn definition() -> CheckDefinition {
    CheckDefinition::new(ID, "Memcache/Redis settings", "performance", Severity::Critical)
        .with_message(
            MessageType::Description,
            "Checks that the default cache bin uses an in-memory backend (Memcache or Redis) instead of the database.",
        )
        .with_message(
            MessageType::Action,
            "Install and configure Memcache or Redis and set cache.default to its backend service.",
        )
        .with_message(
            MessageType::Impact,
            "Database-backed caching adds query load on every request and slows page delivery.",
        )
        .with_message(MessageType::FailMessage, "The default cache backend is ${backend}.")
        .with_message(MessageType::SuccessMessage, "The default cache backend is ${backend}.")
}

/// Passes when `cache.default` names the memcache or redis backend.
pub struct BackendCacheSettings {
    settings: Arc<dyn SettingsProvider>,
}

impl BackendCacheSettings {
    pub fn new(ctx: &CheckContext<'_>) -> Self {
        Self {
            settings: Arc::clone(&ctx.env.settings),
        }
    }
}

impl Check for BackendCacheSettings {
    fn perform(&self) -> anyhow::Result<AuditReason> {
        let backend = self
            .settings
            .get_str("cache.default")?
            .unwrap_or_else(|| DATABASE_BACKEND.to_string());
        let short = backend.strip_prefix("cache.backend.").unwrap_or(&backend).to_string();

        let reason = match backend.as_str() {
            "cache.backend.memcache" => {
                AuditReason::pass(ID).with_reason("Memcached is configured properly")
            }
            "cache.backend.redis" => {
                AuditReason::pass(ID).with_reason("Redis is configured properly")
            }
            _ => AuditReason::fail(ID).with_reason(format!("cache backend is {}", short)),
        };
        Ok(reason.with_argument("backend", short))
    }
}
