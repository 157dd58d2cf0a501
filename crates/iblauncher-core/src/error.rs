//! Error types for installation discovery and configuration loading.
//!
//! None of these escape as panics: the resolver turns descriptor problems
//! into diagnostics and falls through to the next strategy, and only the
//! typed `resolution()` API surfaces `InstallationError` to callers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the typed installation API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InstallationError {
    /// Every search strategy was exhausted.
    #[error(
        "No IntegrationBus installation found, neither from configuration nor at local paths. \
         Try to reinstall or configure '{}'.",
        descriptor_path.display()
    )]
    NotFound { descriptor_path: PathBuf },
}

/// Problems with an installation descriptor file that exists but is unusable.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The file content is not valid JSON.
    #[error("Installation configuration '{}' invalid ('{source}')", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but is not a JSON object.
    #[error("Installation configuration '{}' invalid ('expected a JSON object, found {found}')", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },
}

/// Problems loading network node records.
#[derive(Debug, Error)]
pub enum NetworkNodeError {
    /// The input is not valid JSON or a record lacks a string `Name`.
    #[error("Invalid network node data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input is neither an array nor an object with a `NetworkNodes` array.
    #[error("Expected a JSON array of network nodes or an object with a 'NetworkNodes' array")]
    InvalidShape,
}
