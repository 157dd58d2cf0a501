//! Status command handler.

use anyhow::Result;

use iblauncher_core::InstallationResolver;

/// Execute the status command.
///
/// Returns whether an installation was found. With `verbose`, the resolver
/// has already reported where.
pub fn execute(resolver: &InstallationResolver, verbose: bool) -> Result<bool> {
    let installed = resolver.is_installed(verbose);
    if installed && !verbose {
        println!("IntegrationBus installation found");
    }
    Ok(installed)
}
