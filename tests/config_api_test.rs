//! Integration tests for configuration loading and overrides.

use std::fs;
use std::sync::Arc;

use advaudit::check::{CheckDefinition, Severity};
use advaudit::config::{load_config, CheckOverrides};
use advaudit::environment::{FileStore, KeyValueStore};
use advaudit::AuditError;
use tempfile::TempDir;

fn write_config(temp: &TempDir, name: &str, content: &str) {
    let dir = temp.path().join(".advaudit");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn local_overlay_merges_over_project_config() {
    let temp = TempDir::new().unwrap();
    write_config(
        &temp,
        "config.yml",
        r#"
settings:
  workers: 2
environment:
  modules: [hacked]
  values:
    cache:
      default: cache.backend.database
"#,
    );
    write_config(
        &temp,
        "config.local.yml",
        "environment:\n  values:\n    cache:\n      default: cache.backend.redis\n",
    );

    let config = load_config(temp.path()).unwrap();
    assert_eq!(config.settings.workers, 2);
    assert_eq!(config.environment.modules, vec!["hacked"]);
    assert_eq!(
        config.environment.values["cache"]["default"].as_str(),
        Some("cache.backend.redis")
    );
}

#[test]
fn invalid_severity_is_rejected_at_load() {
    let temp = TempDir::new().unwrap();
    write_config(
        &temp,
        "config.yml",
        "checks:\n  js_css_aggregation:\n    severity: urgent\n",
    );
    let err = load_config(temp.path()).unwrap_err();
    assert!(matches!(err, AuditError::InvalidSeverity { .. }));
}

#[test]
fn stored_overrides_beat_config() {
    let temp = TempDir::new().unwrap();
    write_config(
        &temp,
        "config.yml",
        "checks:\n  x:\n    enabled: false\n    severity: low\n",
    );
    let config = load_config(temp.path()).unwrap();

    let store: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(&temp.path().join(".advaudit/store.yml")).unwrap());
    let overrides = CheckOverrides::from_config(config.checks).with_store(Arc::clone(&store));
    let definition = CheckDefinition::new("x", "X", "performance", Severity::Critical);

    let effective = overrides.effective(&definition);
    assert!(!effective.enabled);
    assert_eq!(effective.severity, Severity::Low);

    overrides.set_enabled("x", true).unwrap();
    let reopened = FileStore::open(&temp.path().join(".advaudit/store.yml")).unwrap();
    assert_eq!(
        reopened.get("check.x.enabled").unwrap().as_deref(),
        Some("true")
    );
    assert!(overrides.effective(&definition).enabled);
    assert!(definition.enabled);
}
