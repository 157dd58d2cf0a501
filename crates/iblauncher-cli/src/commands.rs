//! Subcommands and their shared arguments.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use iblauncher_core::ParticipantContext;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check whether an IntegrationBus installation can be found
    Status,

    /// Show the resolved installation paths
    Paths,

    /// Print the launch environment for a participant
    Env {
        #[command(flatten)]
        participant: ParticipantArgs,
    },

    /// Resolve placeholders and environment references in a text
    Resolve {
        /// Text containing placeholders such as %INTEGRATIONBUS_BINPATH%
        text: String,
        #[command(flatten)]
        participant: ParticipantArgs,
    },

    /// Look up a network node by name
    Node {
        /// Exact name of the node
        name: String,
        /// JSON file with a node array or an object holding "NetworkNodes"
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Identity of the participant being launched.
#[derive(Args, Debug, Clone)]
pub struct ParticipantArgs {
    /// Simulation configuration file
    #[arg(short, long)]
    pub config: PathBuf,
    /// Participant name
    #[arg(short, long)]
    pub participant: String,
    /// Domain id of the simulation setup
    #[arg(short, long, default_value_t = 42)]
    pub domain: u32,
}

impl ParticipantArgs {
    /// Participant context borrowing from these arguments.
    ///
    /// `config_file` must already be absolute; see [`iblauncher_core::paths::absolutize`].
    pub fn context<'a>(&'a self, config_file: &'a std::path::Path) -> ParticipantContext<'a> {
        ParticipantContext::new(config_file, &self.participant, self.domain)
    }
}
