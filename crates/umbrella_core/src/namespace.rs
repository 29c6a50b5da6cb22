//! Wrapping package namespace owning re-exported bindings.

use crate::extension::module::Attribute;
use std::collections::BTreeMap;

/// The importable unit being initialized.
///
/// Owns the flattened bindings for the process lifetime once bound. Binding
/// is insert-or-rebind: the version rebind step relies on overwriting names
/// the flatten step may already have copied.
pub struct PackageNamespace {
    name: String,
    bindings: BTreeMap<String, Attribute>,
}

impl PackageNamespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: BTreeMap::new(),
        }
    }

    /// Wrapping package name, e.g. `umbrella`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds one attribute, replacing any previous binding of the same name.
    pub fn bind(&mut self, name: impl Into<String>, attribute: Attribute) {
        self.bindings.insert(name.into(), attribute);
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Returns sorted binding names.
    pub fn binding_names(&self) -> Vec<String> {
        self.bindings.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::PackageNamespace;
    use crate::extension::module::Attribute;
    use std::sync::Arc;

    #[test]
    fn bind_replaces_previous_binding() {
        let mut namespace = PackageNamespace::new("umbrella");
        namespace.bind("__version__", Attribute::Value(Arc::new("stale".to_string())));
        namespace.bind("__version__", Attribute::Value(Arc::new("0.1.0".to_string())));

        assert_eq!(namespace.len(), 1);
        let bound = namespace.get("__version__").expect("version binding");
        match bound {
            Attribute::Value(value) => {
                let text = value.downcast_ref::<String>().expect("string value");
                assert_eq!(text, "0.1.0");
            }
            other => panic!("unexpected attribute kind: {other:?}"),
        }
    }

    #[test]
    fn binding_names_are_sorted() {
        let mut namespace = PackageNamespace::new("umbrella");
        namespace.bind("zeta", Attribute::Value(Arc::new(1u8)));
        namespace.bind("alpha", Attribute::Value(Arc::new(2u8)));

        assert_eq!(namespace.binding_names(), ["alpha", "zeta"]);
        assert!(namespace.contains("alpha"));
        assert!(!namespace.contains("omega"));
    }

    #[test]
    fn new_namespace_is_empty() {
        let namespace = PackageNamespace::new("umbrella");
        assert!(namespace.is_empty());
        assert_eq!(namespace.name(), "umbrella");
    }
}
