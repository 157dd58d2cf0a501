//! CLI entry point.
//!
//! Sets up logging and the environment, builds the resolver and dispatches
//! to the handlers.

use clap::{CommandFactory, Parser};
use std::process::ExitCode;

use iblauncher_cli::{Cli, Commands, handlers};
use iblauncher_core::InstallationResolver;

fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging; RUST_LOG overrides the default level
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    let Some(command) = cli.command.as_ref() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let resolver = InstallationResolver::new(cli.resolver_config());
    tracing::debug!(?resolver, "Resolver configured");

    let succeeded = match command {
        Commands::Status => handlers::status::execute(&resolver, cli.verbose)?,
        Commands::Paths => handlers::paths::execute(&resolver, cli.verbose)?,
        Commands::Env { participant } => handlers::env::execute(participant)?,
        Commands::Resolve { text, participant } => {
            handlers::resolve::execute(&resolver, text, participant)?
        }
        Commands::Node { name, file } => handlers::node::execute(name, file)?,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
