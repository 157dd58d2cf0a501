//! Launch environment for an IntegrationBus participant.
//!
//! The participant process reads its configuration file, name and domain id
//! from three environment variables. This module builds that set; spawning
//! the process is left to the caller.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Placeholder / variable for the binary directory.
pub const BINPATH_VAR: &str = "INTEGRATIONBUS_BINPATH";
/// Placeholder / variable for the library directory.
pub const LIBPATH_VAR: &str = "INTEGRATIONBUS_LIBPATH";
/// Environment variable holding the simulation configuration file.
pub const CONFIGFILE_VAR: &str = "INTEGRATIONBUS_CONFIGFILE";
/// Environment variable holding the participant name.
pub const PARTICIPANTNAME_VAR: &str = "INTEGRATIONBUS_PARTICIPANTNAME";
/// Environment variable holding the domain id.
pub const DOMAINID_VAR: &str = "INTEGRATIONBUS_DOMAINID";

/// Caller-supplied identity of one participant in a simulation setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantContext<'a> {
    /// Absolute path of the simulation configuration file.
    pub config_file: &'a Path,
    /// Name of the participant in the simulation setup.
    pub participant_name: &'a str,
    /// Domain id of the simulation setup.
    pub domain_id: u32,
}

impl<'a> ParticipantContext<'a> {
    pub const fn new(config_file: &'a Path, participant_name: &'a str, domain_id: u32) -> Self {
        Self {
            config_file,
            participant_name,
            domain_id,
        }
    }

    /// The configuration file path as substituted into templates.
    pub fn config_file_text(&self) -> String {
        self.config_file.to_string_lossy().into_owned()
    }

    /// Launch variables for this participant.
    pub fn environment_map(&self) -> EnvironmentMap {
        build_environment_map(self.config_file, self.participant_name, self.domain_id)
    }
}

/// Environment variables for launching a participant.
///
/// Iterates in name order, so it can be handed straight to
/// `std::process::Command::envs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentMap(BTreeMap<String, String>);

impl EnvironmentMap {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for EnvironmentMap {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EnvironmentMap {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build the three launch variables for a participant.
pub fn build_environment_map(
    config_file: &Path,
    participant_name: &str,
    domain_id: u32,
) -> EnvironmentMap {
    let mut vars = BTreeMap::new();
    vars.insert(
        CONFIGFILE_VAR.to_string(),
        config_file.to_string_lossy().into_owned(),
    );
    vars.insert(PARTICIPANTNAME_VAR.to_string(), participant_name.to_string());
    vars.insert(DOMAINID_VAR.to_string(), domain_id.to_string());
    EnvironmentMap(vars)
}
