//! Finding installed executables and reading their versions.
//!
//! # Modules
//!
//! - [`platform`] - OS family detection and the executable rule
//! - [`locator`] - PATH and standard install-root search
//! - [`inspect`] - Executability check and version probe

pub mod inspect;
pub mod locator;
pub mod platform;

pub use inspect::{first_line, Inspect, Inspection, ProbeFailure, VersionExtractor, VersionReading};
pub use locator::{Candidate, Locate, SystemLocator};
pub use platform::{parse_system_path, split_path_var, Platform};
