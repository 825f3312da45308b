//! Version extraction from candidate executables.
//!
//! Each candidate is classified as executable or not; executables are run
//! with the resource's version flag and the first line of output is kept.
//! A broken binary is recorded as a [`ProbeFailure`] and never stops the
//! scan.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

use super::platform::Platform;

/// Why a version could not be read from an executable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeFailure {
    /// The process could not be started.
    #[error("could not run: {message}")]
    Spawn { message: String },

    /// The process ran but exited unsuccessfully.
    #[error("exited with status {}{}", format_code(.code), format_output(.output))]
    Exit { code: Option<i32>, output: String },

    /// The process succeeded but printed nothing.
    #[error("no version output")]
    NoOutput,
}

fn format_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string())
}

fn format_output(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!(": {}", output)
    }
}

/// Outcome of asking an executable for its version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VersionReading {
    /// First line the tool printed.
    Reported { version: String },
    /// The probe failed.
    Failed { reason: ProbeFailure },
}

impl VersionReading {
    /// The reported version line, if the probe succeeded.
    pub fn version(&self) -> Option<&str> {
        match self {
            VersionReading::Reported { version } => Some(version),
            VersionReading::Failed { .. } => None,
        }
    }
}

impl fmt::Display for VersionReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionReading::Reported { version } => write!(f, "{}", version),
            VersionReading::Failed { reason } => write!(f, "Error: {}", reason),
        }
    }
}

impl From<Result<String, ProbeFailure>> for VersionReading {
    fn from(result: Result<String, ProbeFailure>) -> Self {
        match result {
            Ok(version) => VersionReading::Reported { version },
            Err(reason) => VersionReading::Failed { reason },
        }
    }
}

/// Executability and version of one candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    /// Passed the platform executable test.
    pub executable: bool,
    /// `None` when the path is not executable (never attempted).
    pub version: Option<VersionReading>,
}

impl Inspection {
    /// A path that failed the executable test.
    pub fn not_executable() -> Self {
        Self {
            executable: false,
            version: None,
        }
    }
}

/// Classifies candidate paths and reads their versions.
pub trait Inspect {
    /// Inspect `path`, running it with `version_flag` if executable.
    fn inspect(&self, path: &Path, version_flag: &str) -> Inspection;
}

/// Inspector that runs the real binaries.
#[derive(Debug, Clone, Copy)]
pub struct VersionExtractor {
    platform: Platform,
}

impl VersionExtractor {
    /// Create an extractor using the given platform's executable rule.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Run `path version_flag` and return the first output line.
    pub fn read_version(&self, path: &Path, version_flag: &str) -> Result<String, ProbeFailure> {
        let output = Command::new(path)
            .arg(version_flag)
            .output()
            .map_err(|e| ProbeFailure::Spawn {
                message: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let first = first_line(&stdout, &stderr);

        if !output.status.success() {
            return Err(ProbeFailure::Exit {
                code: output.status.code(),
                output: first.unwrap_or_default(),
            });
        }

        first.ok_or(ProbeFailure::NoOutput)
    }
}

impl Inspect for VersionExtractor {
    fn inspect(&self, path: &Path, version_flag: &str) -> Inspection {
        if !self.platform.is_executable(path) {
            tracing::debug!("{} is not executable; skipping version probe", path.display());
            return Inspection::not_executable();
        }

        let reading = VersionReading::from(self.read_version(path, version_flag));
        match &reading {
            VersionReading::Reported { version } => {
                tracing::debug!("{} reports {}", path.display(), version)
            }
            VersionReading::Failed { reason } => {
                tracing::debug!("Version probe of {} failed: {}", path.display(), reason)
            }
        }

        Inspection {
            executable: true,
            version: Some(reading),
        }
    }
}

/// First non-blank line of the combined output (stdout, then stderr).
///
/// Tools such as `java -version` print their version on stderr.
pub fn first_line(stdout: &str, stderr: &str) -> Option<String> {
    stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}
