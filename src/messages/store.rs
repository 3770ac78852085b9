//! Message lookup with user overrides.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::warn;

use super::interpolation::interpolate;
use super::kind::MessageType;
use crate::check::{Arguments, CheckDefinition};
use crate::environment::KeyValueStore;
use crate::error::Result;

/// Keyed read/write access to the messages of every check.
///
/// `get` never fails: a missing override falls back to the compiled
/// default, and a missing default to an empty string. Store errors during
/// reads are logged and treated as "no override".
#[derive(Clone)]
pub struct MessageStore {
    store: Arc<dyn KeyValueStore>,
    defaults: HashMap<String, BTreeMap<MessageType, String>>,
}

impl MessageStore {
    /// Create a message store with no compiled defaults.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            defaults: HashMap::new(),
        }
    }

    /// Register compiled defaults from check definitions.
    pub fn with_defaults<'a, I>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = &'a CheckDefinition>,
    {
        for definition in definitions {
            self.defaults
                .insert(definition.id.to_string(), definition.messages.clone());
        }
        self
    }

    /// Storage key for an override.
    pub fn key(check_id: &str, kind: MessageType) -> String {
        format!("messages.{}.{}", check_id, kind)
    }

    /// The user override, if one is stored.
    pub fn get_override(&self, check_id: &str, kind: MessageType) -> Option<String> {
        match self.store.get(&Self::key(check_id, kind)) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(check = check_id, kind = %kind, "Failed to read message override: {:#}", e);
                None
            }
        }
    }

    /// The compiled default, or an empty string.
    pub fn get_default(&self, check_id: &str, kind: MessageType) -> &str {
        self.defaults
            .get(check_id)
            .and_then(|messages| messages.get(&kind))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Effective text: override, else default, else empty.
    pub fn get(&self, check_id: &str, kind: MessageType) -> String {
        self.get_override(check_id, kind)
            .unwrap_or_else(|| self.get_default(check_id, kind).to_string())
    }

    /// Effective text with `${name}` placeholders filled from arguments.
    pub fn render(&self, check_id: &str, kind: MessageType, arguments: &Arguments) -> String {
        interpolate(&self.get(check_id, kind), arguments)
    }

    /// Persist an override. Empty text clears it.
    pub fn set(&self, check_id: &str, kind: MessageType, text: &str) -> Result<()> {
        let key = Self::key(check_id, kind);
        if text.is_empty() {
            self.store.remove(&key)?;
        } else {
            self.store.set(&key, text)?;
        }
        Ok(())
    }

    /// Persist an override for a message kind given by name.
    pub fn set_named(&self, check_id: &str, kind: &str, text: &str) -> Result<()> {
        let kind: MessageType = kind.parse()?;
        self.set(check_id, kind, text)
    }

    /// Effective text of every kind, in display order.
    pub fn all(&self, check_id: &str) -> Vec<(MessageType, String)> {
        MessageType::ALL
            .into_iter()
            .map(|kind| (kind, self.get(check_id, kind)))
            .collect()
    }
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("defaults", &self.defaults.len())
            .finish_non_exhaustive()
    }
}
