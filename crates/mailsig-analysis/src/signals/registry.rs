//! Signal definitions keyed by name.

use mailsig_core::config::SignalsConfig;
use mailsig_core::types::{SignalDefinition, SignalValue};
use rustc_hash::FxHashMap;

/// Definitions for the signals that need more than the numeric default.
///
/// Signals without a definition are judged by [`SignalDefinition::inferred`]:
/// numeric values are active when non-zero, text is never active.
#[derive(Debug, Clone)]
pub struct SignalRegistry {
    definitions: FxHashMap<String, SignalDefinition>,
}

impl SignalRegistry {
    /// An empty registry: every signal uses the numeric default.
    pub fn empty() -> Self {
        Self {
            definitions: FxHashMap::default(),
        }
    }

    /// Registry with the configured (or built-in) positive state sets.
    pub fn from_config(config: &SignalsConfig) -> Self {
        let mut registry = Self::empty();
        for (signal, states) in config.effective_positive_states() {
            registry.register(SignalDefinition::categorical(signal, states));
        }
        registry
    }

    pub fn register(&mut self, definition: SignalDefinition) {
        self.definitions.insert(definition.name.clone(), definition);
    }

    pub fn with_definition(mut self, definition: SignalDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn definition(&self, name: &str) -> Option<&SignalDefinition> {
        self.definitions.get(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn is_active(&self, name: &str, value: &SignalValue) -> bool {
        match self.definitions.get(name) {
            Some(definition) => definition.is_active(value),
            None => SignalDefinition::inferred(name, value).is_active(value),
        }
    }
}

impl Default for SignalRegistry {
    fn default() -> Self {
        Self::from_config(&SignalsConfig::default())
    }
}
