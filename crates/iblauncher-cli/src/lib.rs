#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dependencies used only by main.rs
use dotenvy as _;
use tracing as _;
use tracing_subscriber as _;

#[cfg(test)]
use tempfile as _;

pub mod commands;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use commands::{Commands, ParticipantArgs};
pub use parser::Cli;
