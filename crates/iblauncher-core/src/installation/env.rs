//! Environment provider trait for testable installation discovery.

use std::ffi::OsString;
use std::path::PathBuf;

/// Trait for accessing environment variables (injectable for testing).
pub trait EnvProvider: Send + Sync {
    /// Get an environment variable.
    fn get(&self, key: &str) -> Option<OsString>;

    /// The current user's home directory, used for `~` expansion.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Production environment provider that reads from the actual process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// Test/mock environment provider with predefined variables.
///
/// The home directory is taken from the `HOME` variable.
#[cfg(test)]
#[derive(Default)]
pub struct MockEnv {
    vars: std::collections::HashMap<String, OsString>,
}

#[cfg(test)]
impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
impl EnvProvider for MockEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.vars.get("HOME").map(PathBuf::from)
    }
}
