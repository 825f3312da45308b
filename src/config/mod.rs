//! Configuration loading, parsing, and validation for toolprobe.
//!
//! - Schema definitions and built-in defaults in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use toolprobe::config::{parse_config, validate};
//! use std::path::Path;
//!
//! let yaml = "resources:\n  - name: node\n    url: https://nodejs.org/en/\n";
//! let config = parse_config(yaml, Path::new("toolprobe.yml")).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.resources[0].version_flag, "--version");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{load_config, load_config_file, parse_config, ConfigPaths, PROJECT_CONFIG_FILE};
pub use schema::{ResourceConfig, ScanConfig, Settings};
pub use validator::{validate, validate_config, ValidationError};
