use std::collections::HashMap;

use crate::effects::{FallingEffect, GroupingEffect, TextEffect};

/// Registry of the text-entry effects the generator can emit
///
/// Effects are registered by name; the generator looks them up by the
/// name carried in a text element's `effect` option.
pub struct TextEffectRegistry {
    effects: HashMap<String, Box<dyn Fn() -> Box<dyn TextEffect> + Send + Sync>>,
}

impl TextEffectRegistry {
    /// Create a registry holding the built-in effects
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_builtin_effects();
        registry
    }

    /// Create a registry with no effects; text stays static
    pub fn empty() -> Self {
        Self {
            effects: HashMap::new(),
        }
    }

    fn register_builtin_effects(&mut self) {
        self.register("grouping".to_string(), || Box::new(GroupingEffect::new()));
        self.register("falling".to_string(), || Box::new(FallingEffect::new()));
    }

    /// Register an effect under `name`, replacing any previous one
    pub fn register<F>(&mut self, name: String, factory: F)
    where
        F: Fn() -> Box<dyn TextEffect> + Send + Sync + 'static,
    {
        self.effects.insert(name, Box::new(factory));
    }

    /// New instance of the named effect
    pub fn get_effect(&self, name: &str) -> Option<Box<dyn TextEffect>> {
        self.effects.get(name).map(|factory| factory())
    }

    /// Registered names, sorted
    pub fn available_effects(&self) -> Vec<String> {
        let mut names: Vec<String> = self.effects.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for TextEffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
