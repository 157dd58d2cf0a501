//! Command handlers.
//!
//! Handlers follow the pattern:
//! - Signature: `pub fn execute(...) -> Result<bool>`, `false` meaning the
//!   command ran but its subject was not found
//! - Thin wrappers that call into `iblauncher-core` and format the result
//!   for the terminal
//!
//! Diagnostics from the resolver are already printed by its sink, so
//! handlers do not repeat them.

pub mod env;
pub mod node;
pub mod paths;
pub mod resolve;
pub mod status;
