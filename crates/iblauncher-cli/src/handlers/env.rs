//! Env command handler.

use anyhow::Result;

use iblauncher_core::paths::absolutize;

use crate::commands::ParticipantArgs;

/// Print the launch environment as `NAME=value` lines.
pub fn execute(participant: &ParticipantArgs) -> Result<bool> {
    let config_file = absolutize(&participant.config);
    for (name, value) in &participant.context(&config_file).environment_map() {
        println!("{name}={value}");
    }
    Ok(true)
}
