//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;
use std::path::PathBuf;

use iblauncher_core::{ANCHOR_DIR_ENV, ResolverConfig};

use crate::commands::Commands;

/// Command-line interface for inspecting an IntegrationBus installation.
#[derive(Parser)]
#[command(name = "iblauncher")]
#[command(about = "Locate an IntegrationBus installation and resolve launch variables")]
#[command(version)]
pub struct Cli {
    /// Directory the installation layouts are resolved against
    /// (defaults to the directory of this executable)
    #[arg(long = "anchor-dir", global = true, env = ANCHOR_DIR_ENV)]
    pub anchor_dir: Option<PathBuf>,

    /// Report which installation was found and where
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Resolver settings for this invocation.
    pub fn resolver_config(&self) -> ResolverConfig {
        let config = ResolverConfig::default().with_verbose(self.verbose);
        match &self.anchor_dir {
            Some(dir) => config.with_anchor_dir(dir),
            None => config,
        }
    }
}
