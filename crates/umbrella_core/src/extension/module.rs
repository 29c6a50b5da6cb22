//! Extension module contract and structural attribute kinds.

use crate::extension::metadata::VersionMetadata;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Opaque handle to one exported value.
pub type SymbolRef = Arc<dyn Any + Send + Sync>;

/// Structural classification of one extension attribute.
///
/// The kind is decided by the layer that loads the native component, so the
/// binder never needs runtime-type reflection to recognize submodules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Value,
    Callable,
    Submodule,
}

/// One named export of an extension module.
#[derive(Clone)]
pub enum Attribute {
    Value(SymbolRef),
    Callable(SymbolRef),
    Submodule(Arc<dyn ExtensionModule>),
}

impl Attribute {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Value(_) => AttributeKind::Value,
            Self::Callable(_) => AttributeKind::Callable,
            Self::Submodule(_) => AttributeKind::Submodule,
        }
    }

    /// Returns the submodule handle when this attribute is a submodule.
    pub fn as_submodule(&self) -> Option<Arc<dyn ExtensionModule>> {
        match self {
            Self::Submodule(module) => Some(Arc::clone(module)),
            _ => None,
        }
    }

    /// Returns whether both attributes reference the same underlying export.
    pub fn ptr_eq(&self, other: &Attribute) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => Arc::ptr_eq(a, b),
            (Self::Callable(a), Self::Callable(b)) => Arc::ptr_eq(a, b),
            (Self::Submodule(a), Self::Submodule(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(_) => f.write_str("Attribute::Value"),
            Self::Callable(_) => f.write_str("Attribute::Callable"),
            Self::Submodule(module) => write!(f, "Attribute::Submodule({})", module.name()),
        }
    }
}

/// Opaque collaborator contract for the loaded native extension.
///
/// The binder consumes only this surface: attribute enumeration (finite, one
/// pass), attribute lookup by name, the declared export list, and the four
/// version identifiers.
pub trait ExtensionModule: Send + Sync {
    /// Internal extension module name, e.g. `_umbrella`.
    fn name(&self) -> &str;

    /// Version identifiers the binder rebinds unconditionally.
    fn version_metadata(&self) -> &VersionMetadata;

    /// Declared public export list; `None` means "every non-underscore name".
    fn declared_exports(&self) -> Option<&[String]>;

    /// All attribute names, public and private, in one finite pass.
    fn attribute_names(&self) -> Vec<String>;

    /// Attribute lookup by name.
    fn attribute(&self, name: &str) -> Option<Attribute>;
}

/// Declaration-backed extension module.
///
/// Serves both as the built-in baseline the CLI binds and as the test double
/// for binder behavior; real native modules implement [`ExtensionModule`]
/// directly in their loading layer.
pub struct StaticExtensionModule {
    name: String,
    metadata: VersionMetadata,
    exports: Option<Vec<String>>,
    attributes: BTreeMap<String, Attribute>,
}

impl StaticExtensionModule {
    pub fn new(name: impl Into<String>, metadata: VersionMetadata) -> Self {
        Self {
            name: name.into(),
            metadata,
            exports: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Declares an explicit public export list.
    pub fn declare_exports(&mut self, names: Vec<String>) {
        self.exports = Some(names);
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: SymbolRef) {
        self.attributes.insert(name.into(), Attribute::Value(value));
    }

    pub fn set_callable(&mut self, name: impl Into<String>, value: SymbolRef) {
        self.attributes
            .insert(name.into(), Attribute::Callable(value));
    }

    pub fn set_submodule(&mut self, name: impl Into<String>, module: Arc<dyn ExtensionModule>) {
        self.attributes
            .insert(name.into(), Attribute::Submodule(module));
    }

    /// Built-in baseline extension used to verify the binding path.
    ///
    /// Shaped like the `_umbrella` native module: an `objc` submodule holding
    /// class-like callables, a top-level `Runtime` callable, and one private
    /// attribute the fallback flatten rule must skip.
    pub fn objc_baseline() -> Self {
        let metadata = VersionMetadata::compose(
            "umbrella",
            "0.1.0-55aeee2",
            "55aeee2",
            "55aeee26e829041c603ade61d3b34b8351c5bab6",
        );

        let mut objc = Self::new("objc", metadata.clone());
        for class_name in ["Class", "Method", "Property", "Protocol", "TypeEncoding"] {
            objc.set_callable(class_name, Arc::new(class_name.to_string()));
        }

        let mut module = Self::new("_umbrella", metadata);
        module.set_callable("Runtime", Arc::new("Runtime".to_string()));
        module.set_value("__doc__", Arc::new("Umbrella API".to_string()));
        module.set_submodule("objc", Arc::new(objc));
        module
    }
}

impl ExtensionModule for StaticExtensionModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn version_metadata(&self) -> &VersionMetadata {
        &self.metadata
    }

    fn declared_exports(&self) -> Option<&[String]> {
        self.exports.as_deref()
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }

    fn attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes.get(name).cloned()
    }
}
