//! Extension loading contract.

use crate::extension::module::ExtensionModule;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Resolves the native extension module for one wrapping package.
///
/// Loading is the only fallible stage of binding; implementations surface
/// their failure text unmodified through [`ExtensionLoadError`].
pub trait ExtensionLoader {
    fn load(&self, package: &str) -> Result<Arc<dyn ExtensionModule>, ExtensionLoadError>;
}

/// Extension resolution/initialization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionLoadError {
    NotFound(String),
    InitFailed { module: String, reason: String },
}

impl Display for ExtensionLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(package) => {
                write!(f, "no extension module registered for package: {package}")
            }
            Self::InitFailed { module, reason } => {
                write!(f, "extension module failed to initialize: {module}: {reason}")
            }
        }
    }
}

impl Error for ExtensionLoadError {}

/// Loader backed by in-process module declarations.
#[derive(Default)]
pub struct StaticExtensionLoader {
    modules: BTreeMap<String, Arc<dyn ExtensionModule>>,
}

impl StaticExtensionLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the extension module serving one wrapping package.
    pub fn register(&mut self, package: impl Into<String>, module: Arc<dyn ExtensionModule>) {
        self.modules.insert(package.into(), module);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ExtensionLoader for StaticExtensionLoader {
    fn load(&self, package: &str) -> Result<Arc<dyn ExtensionModule>, ExtensionLoadError> {
        self.modules
            .get(package)
            .cloned()
            .ok_or_else(|| ExtensionLoadError::NotFound(package.to_string()))
    }
}
