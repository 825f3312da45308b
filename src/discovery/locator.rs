//! Executable location.
//!
//! A resource is looked up two ways: through the platform's "list every
//! match on PATH" command, and optionally by globbing standard install
//! roots. Absence of a tool is an ordinary outcome, so neither search ever
//! fails; problems are logged and produce no candidates.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::platform::Platform;

/// A path that may hold a resource's executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Location on disk.
    pub path: PathBuf,
    /// Found through PATH rather than the standard-directory scan.
    pub in_path: bool,
}

impl Candidate {
    /// A candidate reported by the PATH search.
    pub fn on_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            in_path: true,
        }
    }

    /// A candidate found under a standard install root.
    pub fn in_standard_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            in_path: false,
        }
    }
}

/// Finds candidate executables for a resource name.
pub trait Locate {
    /// Every candidate for `name`: PATH matches first, then (when
    /// requested) standard-directory matches.
    fn locate(&self, name: &str, include_standard_dirs: bool) -> Vec<Candidate>;
}

/// Locator backed by the real system.
#[derive(Debug, Clone)]
pub struct SystemLocator {
    platform: Platform,
    standard_dirs: Vec<String>,
    path_var: Option<OsString>,
}

impl SystemLocator {
    /// Create a locator searching the given install-root patterns.
    pub fn new(platform: Platform, standard_dirs: Vec<String>) -> Self {
        Self {
            platform,
            standard_dirs,
            path_var: None,
        }
    }

    /// Run the PATH search with a specific PATH value instead of the
    /// inherited one.
    pub fn with_path_var(mut self, path_var: impl Into<OsString>) -> Self {
        self.path_var = Some(path_var.into());
        self
    }

    /// Ask the platform locate command for every PATH match of `name`.
    pub fn search_path(&self, name: &str) -> Vec<PathBuf> {
        let (program, args) = self.platform.locate_command(name);
        let mut cmd = Command::new(program);
        cmd.args(&args);
        if let Some(path_var) = &self.path_var {
            cmd.env("PATH", path_var);
        }

        match cmd.output() {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(PathBuf::from)
                    .collect()
            }
            Ok(output) => {
                tracing::debug!(
                    "{} {} exited with {:?}; treating as not installed",
                    program,
                    name,
                    output.status.code()
                );
                Vec::new()
            }
            Err(e) => {
                tracing::debug!("Could not run {}: {}", program, e);
                Vec::new()
            }
        }
    }

    /// Glob `<root>/**/<name>` under every standard install root and keep
    /// executable regular files.
    pub fn search_standard_dirs(&self, name: &str) -> Vec<PathBuf> {
        let mut matches = Vec::new();
        let escaped = glob::Pattern::escape(name);

        for root in &self.standard_dirs {
            let pattern = Path::new(root).join("**").join(&escaped);
            let pattern = pattern.to_string_lossy();

            let paths = match glob::glob(&pattern) {
                Ok(paths) => paths,
                Err(e) => {
                    tracing::debug!("Skipping invalid install-root pattern {}: {}", root, e);
                    continue;
                }
            };

            for entry in paths {
                match entry {
                    Ok(path) if path.is_file() && self.platform.is_executable(&path) => {
                        matches.push(path);
                    }
                    Ok(_) => {}
                    Err(e) => tracing::debug!("Unreadable entry under {}: {}", root, e),
                }
            }
        }

        matches
    }
}

impl Locate for SystemLocator {
    fn locate(&self, name: &str, include_standard_dirs: bool) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .search_path(name)
            .into_iter()
            .map(Candidate::on_path)
            .collect();

        if include_standard_dirs {
            candidates.extend(
                self.search_standard_dirs(name)
                    .into_iter()
                    .map(Candidate::in_standard_dir),
            );
        }

        tracing::debug!("Located {} candidate(s) for {}", candidates.len(), name);
        candidates
    }
}
