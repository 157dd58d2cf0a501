//! IntegrationBus installation discovery.
//!
//! Locates the directory holding the IntegrationBus binaries and the one
//! holding its native library, across the layouts an installation can have.
//!
//! ## Architecture
//!
//! - `types`: Core types (`Resolution`, `Attempt`, `InstallationSource`)
//! - `env`: Environment variable access trait (injectable for testing)
//! - `fs`: Filesystem operations trait (injectable for testing)
//! - `descriptor`: The optional `data/IbInstallation.json` file
//! - `search`: Candidate layouts per strategy
//! - `resolve`: Strategy orchestration and caching
//!
//! ## Usage
//!
//! ```rust,no_run
//! use iblauncher_core::{InstallationResolver, ResolverConfig};
//!
//! let resolver = InstallationResolver::new(ResolverConfig::from_env());
//! if let Some(lib) = resolver.library_path() {
//!     println!("Library directory: {}", lib.display());
//! }
//! ```

mod descriptor;
mod env;
mod fs;
mod resolve;
mod search;
mod types;

pub use descriptor::{
    BINPATH_KEY, DESCRIPTOR_DIR, DESCRIPTOR_FILE_NAME, InstallationDescriptor, LIBPATH_KEY,
    descriptor_path,
};
pub use env::{EnvProvider, SystemEnv};
pub use fs::{FsProvider, SystemFs};
pub use resolve::InstallationResolver;
pub use search::InstallationSearcher;
pub use types::{
    Attempt, AttemptOutcome, HierarchyVariant, InstallationSource, Resolution,
    ResolvedInstallation,
};

#[cfg(test)]
pub use env::MockEnv;
#[cfg(test)]
pub use fs::MockFs;
