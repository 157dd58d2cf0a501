//! Resolve command handler.

use anyhow::Result;

use iblauncher_core::InstallationResolver;
use iblauncher_core::paths::absolutize;

use crate::commands::ParticipantArgs;

/// Print `text` with placeholders and environment references resolved.
///
/// An unresolved installation leaves the path placeholders empty; the
/// resolver has then already reported the failure.
pub fn execute(
    resolver: &InstallationResolver,
    text: &str,
    participant: &ParticipantArgs,
) -> Result<bool> {
    let config_file = absolutize(&participant.config);
    let resolved = resolver.resolve_variables(text, &participant.context(&config_file));
    println!("{resolved}");
    Ok(true)
}
