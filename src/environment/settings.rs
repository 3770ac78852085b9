//! Read-only settings lookup.

use serde_yaml::Value;

/// Source of environment facts such as the active cache backend.
pub trait SettingsProvider: Send + Sync {
    /// Look up a dotted path (`cache.default`).
    fn get(&self, path: &str) -> anyhow::Result<Option<Value>>;

    /// Look up a string value. Non-string scalars are stringified.
    fn get_str(&self, path: &str) -> anyhow::Result<Option<String>> {
        Ok(self.get(path)?.and_then(|v| match v {
            Value::String(s) => Some(s),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }))
    }

    /// Look up a boolean. Missing or non-boolean values read as `false`.
    fn get_bool(&self, path: &str) -> anyhow::Result<bool> {
        Ok(matches!(self.get(path)?, Some(Value::Bool(true))))
    }
}

/// Settings backed by an in-memory YAML document.
#[derive(Debug, Clone, Default)]
pub struct YamlSettings {
    root: Value,
}

impl YamlSettings {
    /// Wrap a YAML value (normally a mapping).
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parse settings from YAML text.
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(Self::new(serde_yaml::from_str(content)?))
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        if let Some(found) = self.root.get(path) {
            return Some(found);
        }
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.root, |node, segment| node.get(segment))
    }
}

impl SettingsProvider for YamlSettings {
    fn get(&self, path: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.lookup(path).filter(|v| !v.is_null()).cloned())
    }
}
