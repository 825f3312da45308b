//! Command-line interface for toolprobe.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, ConfigArgs, ScanArgs, UpgradeArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
