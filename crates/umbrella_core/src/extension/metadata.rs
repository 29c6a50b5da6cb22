//! Version metadata identifiers guaranteed on every bound package.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Attribute name for the plain version string.
pub const ATTR_VERSION: &str = "__version__";
/// Attribute name for the short commit identifier.
pub const ATTR_COMMIT: &str = "__commit__";
/// Attribute name for the tag identifier.
pub const ATTR_TAG: &str = "__tag__";
/// Attribute name for the composed human-readable version string.
pub const ATTR_FULL_VERSION: &str = "__full_version__";

/// The four version identifiers every bound package must expose.
///
/// The attribute names are underscore-prefixed, so the fallback flatten rule
/// never copies them; the binder rebinds them explicitly from this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMetadata {
    /// Plain version string, e.g. `0.1.0-55aeee2`.
    pub version: String,
    /// Short commit identifier the build was produced from.
    pub commit: String,
    /// Tag identifier (full commit hash when the build is untagged).
    pub tag: String,
    /// Composed human-readable version, e.g. `umbrella v0.1.0-55aeee2`.
    pub full_version: String,
}

impl VersionMetadata {
    pub fn new(
        version: impl Into<String>,
        commit: impl Into<String>,
        tag: impl Into<String>,
        full_version: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            commit: commit.into(),
            tag: tag.into(),
            full_version: full_version.into(),
        }
    }

    /// Composes `full_version` as `<human_name> v<version>` from the parts.
    pub fn compose(human_name: &str, version: &str, commit: &str, tag: &str) -> Self {
        Self {
            version: version.to_string(),
            commit: commit.to_string(),
            tag: tag.to_string(),
            full_version: format!("{human_name} v{version}"),
        }
    }

    /// Validates that no identifier is empty or blank.
    pub fn validate(&self) -> Result<(), VersionMetadataError> {
        require_field(&self.version, "version")?;
        require_field(&self.commit, "commit")?;
        require_field(&self.tag, "tag")?;
        require_field(&self.full_version, "full_version")?;
        Ok(())
    }
}

fn require_field(value: &str, name: &'static str) -> Result<(), VersionMetadataError> {
    if value.trim().is_empty() {
        return Err(VersionMetadataError::EmptyField(name));
    }
    Ok(())
}

/// Version metadata validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionMetadataError {
    EmptyField(&'static str),
}

impl Display for VersionMetadataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(name) => write!(f, "version metadata field must not be empty: {name}"),
        }
    }
}

impl Error for VersionMetadataError {}
