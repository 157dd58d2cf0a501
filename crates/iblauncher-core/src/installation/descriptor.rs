//! Installation descriptor file (`data/IbInstallation.json`).
//!
//! The descriptor is written by the installer and points at the installed
//! binary and library directories. It is untrusted: a missing or unreadable
//! file is simply absent, and malformed content is reported to the caller.

use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::fs::FsProvider;
use crate::error::DescriptorError;

/// Directory below the anchor that holds the descriptor.
pub const DESCRIPTOR_DIR: &str = "data";

/// File name of the descriptor.
pub const DESCRIPTOR_FILE_NAME: &str = "IbInstallation.json";

/// Key holding the binary directory.
pub const BINPATH_KEY: &str = "INTEGRATIONBUS_BINPATH";

/// Key holding the library directory.
pub const LIBPATH_KEY: &str = "INTEGRATIONBUS_LIBPATH";

/// Location of the descriptor relative to an anchor directory.
pub fn descriptor_path(anchor: &Path) -> PathBuf {
    anchor.join(DESCRIPTOR_DIR).join(DESCRIPTOR_FILE_NAME)
}

/// Typed view of the descriptor. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InstallationDescriptor {
    #[serde(rename = "INTEGRATIONBUS_BINPATH", default)]
    pub binary_path: Option<String>,

    #[serde(rename = "INTEGRATIONBUS_LIBPATH", default)]
    pub library_path: Option<String>,
}

impl InstallationDescriptor {
    /// Both configured paths, if both are present and non-empty.
    pub fn paths(&self) -> Option<(&str, &str)> {
        let binary = self.binary_path.as_deref().filter(|p| !p.is_empty())?;
        let library = self.library_path.as_deref().filter(|p| !p.is_empty())?;
        Some((binary, library))
    }

    /// Parse descriptor text. The top level must be a JSON object.
    pub fn parse(path: &Path, content: &str) -> Result<Self, DescriptorError> {
        let value: Value =
            serde_json::from_str(content).map_err(|source| DescriptorError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if !value.is_object() {
            return Err(DescriptorError::NotAnObject {
                path: path.to_path_buf(),
                found: json_kind(&value),
            });
        }

        serde_json::from_value(value).map_err(|source| DescriptorError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the descriptor at `path`.
    ///
    /// Returns `Ok(None)` when the file cannot be read or is empty.
    pub fn load(fs: &dyn FsProvider, path: &Path) -> Result<Option<Self>, DescriptorError> {
        let content = match fs.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Installation descriptor not available");
                return Ok(None);
            }
        };

        if content.is_empty() {
            return Ok(None);
        }

        Self::parse(path, &content).map(Some)
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
