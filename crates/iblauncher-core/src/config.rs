//! Resolver configuration.
//!
//! Anchor directory resolution order:
//! 1. Explicit `anchor_dir` (e.g. `--anchor-dir`)
//! 2. `IBLAUNCHER_ANCHOR_DIR` environment variable
//! 3. Directory containing the running executable

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::installation::EnvProvider;
use crate::paths::absolutize;
use crate::platform::Platform;

/// Environment variable overriding the anchor directory.
pub const ANCHOR_DIR_ENV: &str = "IBLAUNCHER_ANCHOR_DIR";

/// Settings for an [`InstallationResolver`](crate::InstallationResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Directory all relative lookups start from.
    pub anchor_dir: Option<PathBuf>,
    /// Deployment conventions to follow.
    pub platform: Platform,
    /// Verbosity used when paths are requested implicitly.
    pub verbose: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            anchor_dir: None,
            platform: Platform::current(),
            verbose: true,
        }
    }
}

impl ResolverConfig {
    /// Defaults plus the `IBLAUNCHER_ANCHOR_DIR` override from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(&crate::installation::SystemEnv)
    }

    /// Apply environment overrides without replacing explicit settings.
    #[must_use]
    pub fn with_env_overrides(mut self, env: &dyn EnvProvider) -> Self {
        if self.anchor_dir.is_none() {
            self.anchor_dir = env
                .get(ANCHOR_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from);
        }
        self
    }

    #[must_use]
    pub fn with_anchor_dir(mut self, anchor_dir: impl Into<PathBuf>) -> Self {
        self.anchor_dir = Some(anchor_dir.into());
        self
    }

    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The effective anchor directory, made absolute.
    ///
    /// Falls back to the directory of the running executable.
    pub fn resolve_anchor_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.anchor_dir {
            return Some(absolutize(dir));
        }

        match std::env::current_exe() {
            Ok(exe) => exe.parent().map(absolutize),
            Err(e) => {
                tracing::warn!(error = %e, "Cannot determine executable location");
                None
            }
        }
    }
}
