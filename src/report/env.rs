//! Environment variables recorded at the end of the report.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::discovery::split_path_var;
use crate::inventory::CoveredDirectories;

/// Variables listed in the report, in display order.
pub const REPORTED_VARS: [&str; 3] = ["PATH", "JAVA_HOME", "PYTHON_HOME"];

/// Shown for a variable that is not set.
pub const NOT_SET: &str = "Not Set";

/// Values of [`REPORTED_VARS`] at one point in time.
///
/// Values are kept as raw OS strings so a non-UTF-8 `PATH` is still
/// split and reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: Vec<(String, Option<OsString>)>,
}

impl EnvSnapshot {
    /// Read the variables from the process environment.
    pub fn capture() -> Self {
        Self::from_os_fn(|name| std::env::var_os(name))
    }

    /// Read the variables through `lookup`.
    pub fn from_fn(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_os_fn(|name| lookup(name).map(OsString::from))
    }

    /// Read the variables through `lookup`, as OS strings.
    pub fn from_os_fn(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let vars = REPORTED_VARS
            .iter()
            .map(|name| (name.to_string(), lookup(name)))
            .collect();
        Self { vars }
    }

    /// Value of `name`, if captured and set.
    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// `(name, value)` pairs with unset values shown as "Not Set".
    pub fn display_pairs(&self) -> impl Iterator<Item = (&str, Cow<'_, str>)> {
        self.vars.iter().map(|(n, v)| {
            let value = v
                .as_deref()
                .map(OsStr::to_string_lossy)
                .unwrap_or(Cow::Borrowed(NOT_SET));
            (n.as_str(), value)
        })
    }

    /// PATH entries never reached by the standard-directory scan.
    pub fn uncovered_path_dirs(&self, covered: &CoveredDirectories) -> Vec<PathBuf> {
        uncovered_path_dirs(self.get("PATH"), covered)
    }
}

/// Entries of `path_var` (empty ones skipped, order kept) not in `covered`.
pub fn uncovered_path_dirs(
    path_var: Option<&OsStr>,
    covered: &CoveredDirectories,
) -> Vec<PathBuf> {
    path_var
        .map(split_path_var)
        .unwrap_or_default()
        .into_iter()
        .filter(|dir| !covered.contains(dir))
        .collect()
}
