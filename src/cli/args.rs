//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// toolprobe - Inventory developer-tool installations.
#[derive(Debug, Parser)]
#[command(name = "toolprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ./toolprobe.yml and the user config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan for installed tools and write the report (default)
    Scan(ScanArgs),

    /// Offer to run each resource's upgrade command
    Upgrade(UpgradeArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `scan` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ScanArgs {
    /// Also search the standard install directories (slow)
    #[arg(long)]
    pub standard_dirs: bool,

    /// Report file (defaults to settings.report_file in the working directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the inventory as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print the report to stdout
    #[arg(long)]
    pub print: bool,
}

/// Arguments for the `upgrade` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpgradeArgs {
    /// Only offer these resources (repeatable)
    #[arg(short, long = "resource")]
    pub resources: Vec<String>,

    /// Run upgrades without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
