//! toolprobe - Inventory developer-tool installations.
//!
//! toolprobe finds every installed copy of a configured set of tools
//! (node, npm, java, python, git by default), reads the version each copy
//! reports, looks up the latest published release, and writes a text
//! report of what it found.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`discovery`] - Locating executables and reading their versions
//! - [`error`] - Error types and result aliases
//! - [`inventory`] - Reconciliation of discoveries and the path hierarchy
//! - [`report`] - Text report rendering and the environment snapshot
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`upstream`] - Latest-release lookup per publisher
//!
//! # Example
//!
//! ```
//! use toolprobe::config::ScanConfig;
//!
//! let config = ScanConfig::default();
//! let names: Vec<_> = config.resources.iter().map(|r| r.name.as_str()).collect();
//! assert_eq!(names, ["node", "npm", "java", "python", "git"]);
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod inventory;
pub mod report;
pub mod ui;
pub mod upstream;

pub use error::{Result, ToolprobeError};
