//! Effective `enabled`/`severity` for each check.
//!
//! Precedence: persisted store value, then config file, then the compiled
//! definition. The registry's definitions are never mutated; callers get an
//! effective copy.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use crate::check::{CheckDefinition, Severity};
use crate::config::schema::CheckOverride;
use crate::environment::KeyValueStore;
use crate::error::Result;

/// Resolves configured overrides onto check definitions.
#[derive(Clone, Default)]
pub struct CheckOverrides {
    config: BTreeMap<String, CheckOverride>,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl CheckOverrides {
    /// Overrides from the config file only.
    pub fn from_config(config: BTreeMap<String, CheckOverride>) -> Self {
        Self {
            config,
            store: None,
        }
    }

    /// Layer persisted overrides on top.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn enabled_key(check_id: &str) -> String {
        format!("check.{}.enabled", check_id)
    }

    pub fn severity_key(check_id: &str) -> String {
        format!("check.{}.severity", check_id)
    }

    /// The definition with overrides applied.
    pub fn effective(&self, definition: &CheckDefinition) -> CheckDefinition {
        let id = definition.id.as_str();
        let configured = self.config.get(id);
        let mut effective = definition.clone();

        if let Some(enabled) = self
            .stored(&Self::enabled_key(id))
            .and_then(|v| parse_bool(id, &v))
            .or_else(|| configured.and_then(|c| c.enabled))
        {
            effective.enabled = enabled;
        }

        if let Some(severity) = self
            .stored(&Self::severity_key(id))
            .and_then(|v| parse_severity(id, &v))
            .or_else(|| {
                configured
                    .and_then(|c| c.severity.as_deref())
                    .and_then(|v| parse_severity(id, v))
            })
        {
            effective.severity = severity;
        }

        effective
    }

    /// Persist an enabled override.
    pub fn set_enabled(&self, check_id: &str, enabled: bool) -> Result<()> {
        self.persist(&Self::enabled_key(check_id), if enabled { "true" } else { "false" })
    }

    /// Persist a severity override.
    pub fn set_severity(&self, check_id: &str, severity: Severity) -> Result<()> {
        self.persist(&Self::severity_key(check_id), severity.as_str())
    }

    fn persist(&self, key: &str, value: &str) -> Result<()> {
        match &self.store {
            Some(store) => Ok(store.set(key, value)?),
            None => Err(anyhow::anyhow!("No persistent store configured for '{}'", key).into()),
        }
    }

    fn stored(&self, key: &str) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, "Failed to read override: {:#}", e);
                None
            }
        }
    }
}

fn parse_bool(check_id: &str, value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        other => {
            warn!(check = check_id, value = other, "Ignoring unreadable enabled override");
            None
        }
    }
}

fn parse_severity(check_id: &str, value: &str) -> Option<Severity> {
    match value.parse() {
        Ok(severity) => Some(severity),
        Err(e) => {
            warn!(check = check_id, "Ignoring severity override: {}", e);
            None
        }
    }
}

impl std::fmt::Debug for CheckOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckOverrides")
            .field("config", &self.config)
            .field("store", &self.store.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryStore;

    fn definition() -> CheckDefinition {
        CheckDefinition::new("js_css_aggregation", "Aggregation", "performance", Severity::High)
    }

    fn configured(
        enabled: Option<bool>,
        severity: Option<&str>,
    ) -> BTreeMap<String, CheckOverride> {
        let mut map = BTreeMap::new();
        map.insert(
            "js_css_aggregation".to_string(),
            CheckOverride {
                enabled,
                severity: severity.map(String::from),
            },
        );
        map
    }

    #[test]
    fn no_overrides_returns_compiled_definition() {
        let effective = CheckOverrides::default().effective(&definition());
        assert_eq!(effective, definition());
    }

    #[test]
    fn config_overrides_compiled_values() {
        let overrides = CheckOverrides::from_config(configured(Some(false), Some("low")));
        let effective = overrides.effective(&definition());
        assert!(!effective.enabled);
        assert_eq!(effective.severity, Severity::Low);
    }

    #[test]
    fn store_overrides_config() {
        let store = Arc::new(MemoryStore::new());
        let overrides = CheckOverrides::from_config(configured(Some(false), Some("low")))
            .with_store(store.clone());
        overrides.set_enabled("js_css_aggregation", true).unwrap();
        overrides
            .set_severity("js_css_aggregation", Severity::Critical)
            .unwrap();

        let effective = overrides.effective(&definition());
        assert!(effective.enabled);
        assert_eq!(effective.severity, Severity::Critical);
        assert_eq!(
            store.get("check.js_css_aggregation.enabled").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn unreadable_stored_value_falls_back_to_config() {
        let store = Arc::new(MemoryStore::new());
        store.set("check.js_css_aggregation.severity", "urgent").unwrap();
        let overrides =
            CheckOverrides::from_config(configured(None, Some("low"))).with_store(store);

        assert_eq!(overrides.effective(&definition()).severity, Severity::Low);
    }

    #[test]
    fn persisting_without_store_fails() {
        assert!(CheckOverrides::default()
            .set_enabled("js_css_aggregation", false)
            .is_err());
    }
}
