//! Binding core for the umbrella native extension.
//! This crate is the single source of truth for namespace-binding invariants.

pub mod binding;
pub mod extension;
pub mod logging;
pub mod namespace;
pub mod registry;

pub use binding::{bind_package, BindError, BindOutcome, BindReport, BindingState};
pub use extension::loader::{ExtensionLoadError, ExtensionLoader, StaticExtensionLoader};
pub use extension::metadata::{
    VersionMetadata, VersionMetadataError, ATTR_COMMIT, ATTR_FULL_VERSION, ATTR_TAG, ATTR_VERSION,
};
pub use extension::module::{
    Attribute, AttributeKind, ExtensionModule, StaticExtensionModule, SymbolRef,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use namespace::PackageNamespace;
pub use registry::{global_alias_registry, AliasRegistry};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
