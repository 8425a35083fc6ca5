#![forbid(unsafe_code)]

//! Registry mapping item types to the templates that render them.
//!
//! The registry is filled once the set of declared item definitions is known
//! ([`ItemRegistry::build`]), then only read. Looking up a type nobody
//! declared is a configuration error and fails loudly with [`LookupError`];
//! there is no fallback template.
//!
//! # Invariants
//!
//! 1. Each type maps to at most one template; the last registration wins.
//! 2. [`build`](ItemRegistry::build) replaces the previous contents entirely,
//!    so rebuilding from the same declarations leaves the same bindings.
//!
//! # Example
//!
//! ```
//! use gridstack_widgets::item_registry::ItemRegistry;
//! use gridstack_widgets::template::TemplateRef;
//!
//! let mut reg = ItemRegistry::new();
//! let card = TemplateRef::from_fn(|ctx| format!("<card {}>", ctx.item().id));
//! reg.register("card", card.clone());
//!
//! assert_eq!(reg.resolve("card").unwrap(), card);
//! assert!(reg.resolve("chart").is_err());
//! ```

use std::fmt;

use ahash::AHashMap;

use crate::template::{TemplateDef, TemplateRef};

/// No template is bound for an item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    pub kind: String,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid type \"{}\" for grid stack item def", self.kind)
    }
}

impl std::error::Error for LookupError {}

/// Type → template bindings.
#[derive(Debug, Default, Clone)]
pub struct ItemRegistry {
    bindings: AHashMap<String, TemplateRef>,
}

impl ItemRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `kind` to `template`, replacing any previous binding.
    pub fn register(&mut self, kind: impl Into<String>, template: TemplateRef) {
        self.bindings.insert(kind.into(), template);
    }

    /// Replace all bindings with the given declarations, in order.
    pub fn build(&mut self, defs: impl IntoIterator<Item = TemplateDef>) {
        self.bindings.clear();
        for def in defs {
            self.register(def.kind, def.template);
        }
    }

    /// Template bound to `kind`.
    pub fn resolve(&self, kind: &str) -> Result<TemplateRef, LookupError> {
        self.bindings.get(kind).cloned().ok_or_else(|| LookupError {
            kind: kind.to_string(),
        })
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.bindings.contains_key(kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}
