//! Registration table of check types.
//!
//! The [`CheckRegistry`] maps each check id to its static definition and a
//! factory that builds the check from explicit collaborators. It is filled
//! once during bootstrap and only queried afterwards, so it can be shared
//! behind an `Arc` without locking.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::capability::Check;
use super::definition::{CheckDefinition, CheckId};
use crate::environment::AuditEnvironment;
use crate::error::{AuditError, Result};

/// What a factory receives when building a check instance.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub definition: &'a CheckDefinition,
    pub env: &'a AuditEnvironment,
}

/// Builds a check instance.
pub type CheckFactory = Arc<dyn Fn(&CheckContext<'_>) -> Box<dyn Check> + Send + Sync>;

struct Entry {
    definition: CheckDefinition,
    factory: CheckFactory,
}

/// Definitions of one category, in declaration order.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub checks: Vec<&'a CheckDefinition>,
}

/// Registry of all known check types.
pub struct CheckRegistry {
    env: AuditEnvironment,
    entries: Vec<Entry>,
    index: HashMap<CheckId, usize>,
}

impl CheckRegistry {
    /// Create an empty registry bound to an environment.
    pub fn new(env: AuditEnvironment) -> Self {
        Self {
            env,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a check type.
    ///
    /// A second registration for the same id is rejected with
    /// [`AuditError::DuplicateRegistration`].
    pub fn register<F>(&mut self, definition: CheckDefinition, factory: F) -> Result<()>
    where
        F: Fn(&CheckContext<'_>) -> Box<dyn Check> + Send + Sync + 'static,
    {
        if self.index.contains_key(&definition.id) {
            return Err(AuditError::DuplicateRegistration {
                id: definition.id.to_string(),
            });
        }

        debug!(check = %definition.id, category = %definition.category, "Registered check");
        self.index.insert(definition.id.clone(), self.entries.len());
        self.entries.push(Entry {
            definition,
            factory: Arc::new(factory),
        });
        Ok(())
    }

    /// Build a fresh instance of a check.
    pub fn get(&self, id: &str) -> Result<Box<dyn Check>> {
        let entry = self.entry(id)?;
        let context = CheckContext {
            definition: &entry.definition,
            env: &self.env,
        };
        Ok((entry.factory)(&context))
    }

    /// Static definition of a check.
    pub fn definition(&self, id: &str) -> Result<&CheckDefinition> {
        self.entry(id).map(|entry| &entry.definition)
    }

    /// Whether an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All definitions in declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = &CheckDefinition> {
        self.entries.iter().map(|entry| &entry.definition)
    }

    /// Category names in order of first declaration.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for definition in self.definitions() {
            if !seen.contains(&definition.category.as_str()) {
                seen.push(&definition.category);
            }
        }
        seen
    }

    /// Definitions grouped by category, disabled ones included.
    ///
    /// Groups are produced on demand; each holds its checks in declaration
    /// order and callers inspect `enabled` to flag disabled ones.
    pub fn list_by_category(&self) -> impl Iterator<Item = CategoryGroup<'_>> {
        self.categories().into_iter().map(move |category| CategoryGroup {
            category,
            checks: self
                .definitions()
                .filter(|definition| definition.category == category)
                .collect(),
        })
    }

    /// The environment factories receive.
    pub fn environment(&self) -> &AuditEnvironment {
        &self.env
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: &str) -> Result<&Entry> {
        self.index
            .get(id)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| AuditError::UnknownCheck { id: id.to_string() })
    }
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRegistry")
            .field(
                "checks",
                &self.definitions().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{AuditReason, Severity};

    struct Named(CheckId);

    impl Check for Named {
        fn perform(&self) -> anyhow::Result<AuditReason> {
            Ok(AuditReason::pass(self.0.clone()))
        }
    }

    fn registry() -> CheckRegistry {
        CheckRegistry::new(AuditEnvironment::in_memory())
    }

    fn add(registry: &mut CheckRegistry, definition: CheckDefinition) -> Result<()> {
        registry.register(definition, |ctx| Box::new(Named(ctx.definition.id.clone())))
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = registry();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn register_and_get_builds_instance() {
        let mut registry = registry();
        add(
            &mut registry,
            CheckDefinition::new("a", "A", "performance", Severity::High),
        )
        .unwrap();

        let check = registry.get("a").unwrap();
        assert_eq!(check.perform().unwrap().check_id.as_str(), "a");
        assert!(registry.contains("a"));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut registry = registry();
        add(&mut registry, CheckDefinition::new("a", "A", "x", Severity::Low)).unwrap();
        let err = add(&mut registry, CheckDefinition::new("a", "Again", "y", Severity::Low))
            .unwrap_err();

        assert!(matches!(err, AuditError::DuplicateRegistration { ref id } if id == "a"));
        assert_eq!(registry.definition("a").unwrap().label, "A");
    }

    #[test]
    fn unknown_id_is_an_error() {
        let registry = registry();
        assert!(matches!(
            registry.get("nope").err(),
            Some(AuditError::UnknownCheck { .. })
        ));
        assert!(registry.definition("nope").is_err());
    }

    #[test]
    fn list_by_category_keeps_declaration_order_and_disabled() {
        let mut registry = registry();
        add(
            &mut registry,
            CheckDefinition::new("c1", "C1", "performance", Severity::Low),
        )
        .unwrap();
        add(
            &mut registry,
            CheckDefinition::new("c2", "C2", "security", Severity::High),
        )
        .unwrap();
        add(
            &mut registry,
            CheckDefinition::new("c3", "C3", "performance", Severity::Critical).disabled(),
        )
        .unwrap();

        let groups: Vec<_> = registry.list_by_category().collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "performance");
        let ids: Vec<&str> = groups[0].checks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
        assert!(!groups[0].checks[1].enabled);
        assert_eq!(groups[1].category, "security");
    }

    #[test]
    fn factory_receives_environment() {
        let mut registry = registry();
        registry
            .register(
                CheckDefinition::new("env", "Env", "x", Severity::Low),
                |ctx| {
                    assert_eq!(ctx.env.root, std::path::PathBuf::from("."));
                    Box::new(Named(ctx.definition.id.clone()))
                },
            )
            .unwrap();
        assert!(registry.get("env").is_ok());
    }
}
