//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]; running `toolprobe` with no subcommand scans.

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod scan;
pub mod upgrade;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
