//! Registry of built-in commands.

use std::sync::Arc;

use super::traits::Builtin;

/// Command table, kept in registration order so `help` lists it the way it
/// was declared.
#[derive(Default)]
pub struct BuiltinRegistry {
    builtins: Vec<Arc<dyn Builtin>>,
}

impl BuiltinRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built-in. A later registration with the same name
    /// replaces the earlier one in place.
    pub fn register(&mut self, builtin: impl Builtin + 'static) {
        let builtin: Arc<dyn Builtin> = Arc::new(builtin);
        match self.builtins.iter_mut().find(|b| b.name() == builtin.name()) {
            Some(slot) => *slot = builtin,
            None => self.builtins.push(builtin),
        }
    }

    /// Look up a built-in by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Builtin>> {
        self.builtins.iter().find(|b| b.name() == name).cloned()
    }

    /// Check if a built-in exists.
    pub fn contains(&self, name: &str) -> bool {
        self.builtins.iter().any(|b| b.name() == name)
    }

    /// All built-ins in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Builtin>> {
        self.builtins.iter()
    }

    /// All names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.builtins.iter().map(|b| b.name()).collect()
    }

    /// Number of registered built-ins.
    pub fn len(&self) -> usize {
        self.builtins.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }
}

impl std::fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("builtins", &self.names())
            .finish()
    }
}
