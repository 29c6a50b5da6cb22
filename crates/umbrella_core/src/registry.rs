//! Process-wide submodule alias registry with first-writer-wins inserts.
//!
//! # Responsibility
//! - Map synthetic dotted paths (`<package>.<submodule>`) to loaded handles.
//! - Keep registrations stable: entries are never overwritten or removed.
//!
//! # Invariants
//! - `insert_if_absent` is the only write operation.
//! - The registry does no internal locking; callers serialize binding the way
//!   a host import lock would. The process-wide accessor wraps the registry
//!   in a `Mutex` so the shared handle stays usable from safe code.

use crate::extension::module::ExtensionModule;
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

static GLOBAL_ALIASES: OnceCell<Mutex<AliasRegistry>> = OnceCell::new();

/// Registry of synthetic dotted import paths.
#[derive(Default)]
pub struct AliasRegistry {
    entries: BTreeMap<String, Arc<dyn ExtensionModule>>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one alias unless the key is already present.
    ///
    /// Returns `true` when the alias was inserted, `false` when an earlier
    /// registration kept the key (first writer wins).
    pub fn insert_if_absent(
        &mut self,
        key: impl Into<String>,
        module: Arc<dyn ExtensionModule>,
    ) -> bool {
        let key = key.into();
        if self.entries.contains_key(key.as_str()) {
            return false;
        }
        self.entries.insert(key, module);
        true
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn ExtensionModule>> {
        self.entries.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns sorted alias keys.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns the process-wide alias registry, created on first access.
///
/// The binder takes an explicit `&mut AliasRegistry` handle instead of
/// reaching for this accessor, keeping the dependency visible and testable;
/// process entry points lock here once and pass the guard down.
pub fn global_alias_registry() -> &'static Mutex<AliasRegistry> {
    GLOBAL_ALIASES.get_or_init(|| Mutex::new(AliasRegistry::new()))
}
