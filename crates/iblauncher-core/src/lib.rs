#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod installation;
pub mod network;
pub mod paths;
pub mod platform;
pub mod variables;

// Re-export commonly used types for convenience
pub use config::{ANCHOR_DIR_ENV, ResolverConfig};
pub use diagnostics::{DiagnosticLevel, DiagnosticSink, NoopSink, StdoutSink};
pub use environment::{
    BINPATH_VAR, CONFIGFILE_VAR, DOMAINID_VAR, EnvironmentMap, LIBPATH_VAR, PARTICIPANTNAME_VAR,
    ParticipantContext, build_environment_map,
};
pub use error::{DescriptorError, InstallationError, NetworkNodeError};
pub use installation::{
    Attempt, AttemptOutcome, EnvProvider, FsProvider, HierarchyVariant, InstallationDescriptor,
    InstallationResolver, InstallationSource, Resolution, ResolvedInstallation, SystemEnv,
    SystemFs,
};
pub use network::{NetworkNode, NetworkNodes, get_network_node};
pub use platform::Platform;
pub use variables::{expand_env_vars, expand_user, substitute_variable};

// Only the integration tests touch the real filesystem
#[cfg(test)]
use tempfile as _;
