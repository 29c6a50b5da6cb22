//! One-shot binding between a wrapping package and its native extension.

use crate::extension::loader::{ExtensionLoadError, ExtensionLoader};
use crate::extension::metadata::{
    VersionMetadata, ATTR_COMMIT, ATTR_FULL_VERSION, ATTR_TAG, ATTR_VERSION,
};
use crate::extension::module::{Attribute, AttributeKind, ExtensionModule};
use crate::namespace::PackageNamespace;
use crate::registry::AliasRegistry;
use log::{error, info, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Packages already bound in this process.
///
/// Replaces a host-import-path membership test with an explicit identity set:
/// the guard question is "has this collaborator already been bound", nothing
/// more.
#[derive(Debug, Default)]
pub struct BindingState {
    bound: BTreeSet<String>,
}

impl BindingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self, package: &str) -> bool {
        self.bound.contains(package)
    }

    fn mark_bound(&mut self, package: &str) {
        self.bound.insert(package.to_string());
    }
}

/// Counts from one completed bind, for logging and smoke probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindReport {
    pub package: String,
    pub extension: String,
    pub symbols_flattened: usize,
    pub aliases_registered: usize,
    pub aliases_skipped: usize,
}

/// Result of one binder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindOutcome {
    Bound(BindReport),
    AlreadyBound,
}

/// Binding failures.
///
/// Loading is the only fallible stage; the loader's error text propagates
/// unmodified to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    ExtensionUnavailable {
        package: String,
        source: ExtensionLoadError,
    },
}

impl Display for BindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExtensionUnavailable { package, source } => {
                write!(f, "extension for package `{package}` is unavailable: {source}")
            }
        }
    }
}

impl Error for BindError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ExtensionUnavailable { source, .. } => Some(source),
        }
    }
}

/// Binds one wrapping package to its native extension, exactly once.
///
/// Step order matters: the guard runs first, loading is the only step that
/// can fail (so failure leaves namespace and registry untouched), and the
/// package is marked bound only after every write step completed.
///
/// # Invariants
/// - Rebinding an already-bound package is a no-op (`AlreadyBound`).
/// - The four version identifiers are always bound, even when the declared
///   export list omits them.
/// - Only submodule-kind attributes reach the alias registry, and existing
///   alias keys are never overwritten.
pub fn bind_package(
    namespace: &mut PackageNamespace,
    loader: &dyn ExtensionLoader,
    aliases: &mut AliasRegistry,
    state: &mut BindingState,
) -> Result<BindOutcome, BindError> {
    let package = namespace.name().to_string();
    if state.is_bound(&package) {
        info!("event=bind_skipped module=binding status=ok package={package}");
        return Ok(BindOutcome::AlreadyBound);
    }

    let module = loader.load(&package).map_err(|source| {
        error!("event=bind_failed module=binding status=error package={package} reason={source}");
        BindError::ExtensionUnavailable {
            package: package.clone(),
            source,
        }
    })?;

    let symbols_flattened = flatten_public_symbols(namespace, module.as_ref());
    rebind_version_metadata(namespace, module.version_metadata());
    let (aliases_registered, aliases_skipped) =
        register_submodule_aliases(&package, module.as_ref(), aliases);

    state.mark_bound(&package);
    info!(
        "event=bind_complete module=binding status=ok package={package} extension={} \
         symbols={symbols_flattened} aliases={aliases_registered} alias_conflicts={aliases_skipped}",
        module.name()
    );

    Ok(BindOutcome::Bound(BindReport {
        package,
        extension: module.name().to_string(),
        symbols_flattened,
        aliases_registered,
        aliases_skipped,
    }))
}

/// Copies the extension's public symbols into the wrapping namespace.
///
/// Public means the declared export list when present, otherwise every
/// attribute whose name does not start with `_`. Copies are handle clones,
/// so bound values stay reference-identical to the extension's.
fn flatten_public_symbols(
    namespace: &mut PackageNamespace,
    module: &dyn ExtensionModule,
) -> usize {
    let public_names: Vec<String> = match module.declared_exports() {
        Some(declared) => declared.to_vec(),
        None => module
            .attribute_names()
            .into_iter()
            .filter(|name| !name.starts_with('_'))
            .collect(),
    };

    let mut copied = 0;
    for name in public_names {
        match module.attribute(&name) {
            Some(attribute) => {
                namespace.bind(&name, attribute);
                copied += 1;
            }
            None => {
                // A declared export the extension never defined; skip rather
                // than abort, the remaining exports are still usable.
                warn!(
                    "event=export_missing module=binding status=error extension={} symbol={name}",
                    module.name()
                );
            }
        }
    }
    copied
}

/// Rebinds the four version identifiers unconditionally.
fn rebind_version_metadata(namespace: &mut PackageNamespace, metadata: &VersionMetadata) {
    namespace.bind(ATTR_VERSION, string_value(&metadata.version));
    namespace.bind(ATTR_COMMIT, string_value(&metadata.commit));
    namespace.bind(ATTR_TAG, string_value(&metadata.tag));
    namespace.bind(ATTR_FULL_VERSION, string_value(&metadata.full_version));
}

fn string_value(text: &str) -> Attribute {
    Attribute::Value(Arc::new(text.to_string()))
}

/// Registers every submodule attribute under `<package>.<name>`.
///
/// Returns `(registered, skipped)` where skipped counts keys an earlier
/// writer already holds.
fn register_submodule_aliases(
    package: &str,
    module: &dyn ExtensionModule,
    aliases: &mut AliasRegistry,
) -> (usize, usize) {
    let mut registered = 0;
    let mut skipped = 0;
    for name in module.attribute_names() {
        let Some(attribute) = module.attribute(&name) else {
            continue;
        };
        if attribute.kind() != AttributeKind::Submodule {
            continue;
        }
        let Some(submodule) = attribute.as_submodule() else {
            continue;
        };
        if aliases.insert_if_absent(format!("{package}.{name}"), submodule) {
            registered += 1;
        } else {
            skipped += 1;
        }
    }
    (registered, skipped)
}
