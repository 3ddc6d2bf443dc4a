//! Identifier → literal-value map built while scanning a snippet.
//!
//! A fresh [`Bindings`] is created for every simulation and dropped when it
//! finishes; nothing is shared between calls.  Values are kept as text, the
//! way they appeared in the source (string literals unquoted).

use std::collections::HashMap;

use crate::snippet::value::Number;

/// Binding map for one simulation.
#[derive(Debug, Default, Clone)]
pub struct Bindings {
    vars: HashMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or rebind) `name`.  Later calls win.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Bind `name` only if it has no binding yet.  Returns `true` if inserted.
    pub fn set_if_absent(&mut self, name: &str, value: impl Into<String>) -> bool {
        if self.vars.contains_key(name) {
            return false;
        }
        self.vars.insert(name.to_owned(), value.into());
        true
    }

    /// Get the bound text of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Get the value of `name` parsed as a number.
    pub fn get_number(&self, name: &str) -> Option<Number> {
        Number::parse_literal(self.vars.get(name)?)
    }

    /// All bindings sorted by name.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut all: Vec<_> = self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        all.sort_unstable();
        all
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (k, v) in iter {
            bindings.set(k, v);
        }
        bindings
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
