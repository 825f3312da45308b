//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, ScanArgs};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Where a command finds its configuration.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Directory searched for `toolprobe.yml` and holding the report.
    pub working_dir: PathBuf,
    /// Explicit `--config` path.
    pub config_override: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(working_dir: impl Into<PathBuf>, config_override: Option<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            config_override,
        }
    }

    /// Load and validate the configuration for this context.
    pub fn load_config(&self) -> Result<crate::config::ScanConfig> {
        crate::config::load_config(&self.working_dir, self.config_override.as_deref())
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    pub fn new(working_dir: PathBuf, config_override: Option<PathBuf>) -> Self {
        Self {
            context: CommandContext::new(working_dir, config_override),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.context.working_dir
    }

    /// Route the CLI subcommand to its implementation and execute it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let context = self.context.clone();
        match &cli.command {
            Some(Commands::Scan(args)) => {
                let cmd = super::scan::ScanCommand::new(context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Upgrade(args)) => {
                let cmd = super::upgrade::UpgradeCommand::new(context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Config(args)) => {
                let cmd = super::config::ConfigCommand::new(context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::scan::ScanCommand::new(context, ScanArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
