//! Types for installation discovery.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// The two directories this crate exists to discover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedInstallation {
    /// Directory containing the IntegrationBus binaries.
    pub binary_path: PathBuf,
    /// Directory containing the IntegrationBus library.
    pub library_path: PathBuf,
}

impl ResolvedInstallation {
    pub fn new(binary_path: impl Into<PathBuf>, library_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            library_path: library_path.into(),
        }
    }
}

/// Which layout of the deployment hierarchy matched (strategy 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HierarchyVariant {
    /// `<anchor>/../../../../{bin,lib}`
    Posix,
    /// `<anchor>/../../Release/{bin,lib}`
    Release,
    /// `<anchor>/../../Debug/{bin,lib}`
    Debug,
}

/// How an installation was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstallationSource {
    /// Paths configured in the installation descriptor file.
    Descriptor,
    /// Binaries next to the anchor, libraries in `../lib`.
    LocalLayout,
    /// Installed alongside the launcher in a deployment hierarchy.
    DeploymentHierarchy(HierarchyVariant),
    /// Library found by scanning the `PATH` environment variable.
    SearchPath,
}

impl InstallationSource {
    /// Whether re-validation requires the binary directory to exist.
    ///
    /// A search-path hit only guarantees the library file.
    pub const fn verifies_binary_path(self) -> bool {
        !matches!(self, Self::SearchPath)
    }
}

impl fmt::Display for InstallationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descriptor => write!(f, "descriptor"),
            Self::LocalLayout => write!(f, "local"),
            Self::DeploymentHierarchy(HierarchyVariant::Posix) => write!(f, "deployment"),
            Self::DeploymentHierarchy(HierarchyVariant::Release) => write!(f, "deployment (Release)"),
            Self::DeploymentHierarchy(HierarchyVariant::Debug) => write!(f, "deployment (Debug)"),
            Self::SearchPath => write!(f, "search-path"),
        }
    }
}

/// A single candidate pair that was checked during discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    /// The strategy that proposed this candidate.
    pub source: InstallationSource,
    /// The candidate directories.
    pub candidate: ResolvedInstallation,
    /// The outcome of checking this candidate.
    pub outcome: AttemptOutcome,
}

/// Possible outcomes when validating a candidate installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttemptOutcome {
    /// Both directories and the library file exist (success case).
    Ok,
    /// Library found on the search path; binary directory not checked.
    Accepted,
    /// The binary directory does not exist.
    MissingBinaryDir,
    /// The library directory does not exist.
    MissingLibraryDir,
    /// The library directory exists but holds no library file.
    MissingLibraryFile,
}

impl AttemptOutcome {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::Accepted)
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Accepted => write!(f, "accepted from search path"),
            Self::MissingBinaryDir => write!(f, "binary directory not found"),
            Self::MissingLibraryDir => write!(f, "library directory not found"),
            Self::MissingLibraryFile => write!(f, "library file not found"),
        }
    }
}

/// Full outcome of a successful discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The discovered directories.
    pub installation: ResolvedInstallation,
    /// The strategy that produced them.
    pub source: InstallationSource,
    /// Every candidate checked, in order (for diagnostics).
    pub attempts: Vec<Attempt>,
}
