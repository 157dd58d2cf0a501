//! Platform capability selection.
//!
//! The installation search differs between Posix-like and Windows-like
//! deployments in three places: the library file name, the deployment
//! hierarchy probed by strategy 3, and whether the `PATH` scan runs at all.
//! Everything else in the fallback order is identical.

use serde::{Deserialize, Serialize};

/// Library file name on Posix-like systems.
pub const POSIX_LIBRARY_NAME: &str = "libIntegrationBus.so";

/// Library file name on Windows-like systems.
pub const WINDOWS_LIBRARY_NAME: &str = "IntegrationBus.dll";

/// Which deployment conventions the resolver follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux, macOS and other Unix-likes.
    Posix,
    /// Windows.
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// File whose presence inside the library directory proves an installation.
    #[must_use]
    pub const fn library_file_name(self) -> &'static str {
        match self {
            Self::Posix => POSIX_LIBRARY_NAME,
            Self::Windows => WINDOWS_LIBRARY_NAME,
        }
    }

    /// Separator between entries of the `PATH` environment variable.
    #[must_use]
    pub const fn search_path_separator(self) -> char {
        match self {
            Self::Posix => ':',
            Self::Windows => ';',
        }
    }

    /// Whether the `PATH` scan is part of the search on this platform.
    #[must_use]
    pub const fn scans_search_path(self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Posix => write!(f, "posix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}
