//! Platform detection.
//!
//! Every OS-dependent decision (how to ask the system for all matches of a
//! command, what counts as an executable file) branches on [`Platform`].

use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Extensions Windows treats as directly runnable.
const WINDOWS_EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "cmd", "bat"];

/// OS family the scan runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    /// Detect the platform of the running process.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Program and arguments that list every PATH match for `name`.
    pub fn locate_command(&self, name: &str) -> (&'static str, Vec<String>) {
        match self {
            Platform::Windows => ("where", vec![name.to_string()]),
            Platform::Posix => ("which", vec!["-a".to_string(), name.to_string()]),
        }
    }

    /// Check whether `path` can be run directly.
    ///
    /// Windows decides by extension on a regular file; POSIX by the
    /// execute permission bits.
    pub fn is_executable(&self, path: &Path) -> bool {
        match self {
            Platform::Windows => path.is_file() && has_windows_executable_extension(path),
            Platform::Posix => has_execute_permission(path),
        }
    }
}

fn has_windows_executable_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            WINDOWS_EXECUTABLE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
fn has_execute_permission(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Without permission bits, any existing file is treated as runnable.
#[cfg(not(unix))]
fn has_execute_permission(path: &Path) -> bool {
    path.is_file()
}

/// Split a PATH-style value into directories, dropping empty entries.
pub fn split_path_var(value: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| split_path_var(&path))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn current_matches_target_family() {
        let platform = Platform::current();
        if cfg!(windows) {
            assert_eq!(platform, Platform::Windows);
        } else {
            assert_eq!(platform, Platform::Posix);
        }
    }

    #[test]
    fn locate_command_per_platform() {
        let (program, args) = Platform::Posix.locate_command("node");
        assert_eq!(program, "which");
        assert_eq!(args, vec!["-a", "node"]);

        let (program, args) = Platform::Windows.locate_command("node");
        assert_eq!(program, "where");
        assert_eq!(args, vec!["node"]);
    }

    #[test]
    fn windows_rule_uses_extension() {
        let temp = TempDir::new().unwrap();
        let exe = temp.path().join("node.EXE");
        let cmd = temp.path().join("npm.cmd");
        let script = temp.path().join("node.sh");
        for p in [&exe, &cmd, &script] {
            fs::write(p, "").unwrap();
        }

        assert!(Platform::Windows.is_executable(&exe));
        assert!(Platform::Windows.is_executable(&cmd));
        assert!(!Platform::Windows.is_executable(&script));
    }

    #[test]
    fn windows_rule_requires_regular_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tools.exe");
        fs::create_dir_all(&dir).unwrap();
        assert!(!Platform::Windows.is_executable(&dir));
        assert!(!Platform::Windows.is_executable(&temp.path().join("missing.exe")));
    }

    #[cfg(unix)]
    #[test]
    fn posix_rule_uses_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let exec = temp.path().join("node");
        let plain = temp.path().join("README");
        fs::write(&exec, "#!/bin/sh\n").unwrap();
        fs::write(&plain, "text").unwrap();
        fs::set_permissions(&exec, fs::Permissions::from_mode(0o755)).unwrap();
        fs::set_permissions(&plain, fs::Permissions::from_mode(0o644)).unwrap();

        assert!(Platform::Posix.is_executable(&exec));
        assert!(!Platform::Posix.is_executable(&plain));
    }

    #[test]
    fn posix_rule_false_for_missing_file() {
        assert!(!Platform::Posix.is_executable(Path::new("/nonexistent/path/to/node")));
    }

    #[cfg(unix)]
    #[test]
    fn split_path_var_skips_empty_entries() {
        let dirs = split_path_var(OsStr::new("/usr/bin::/opt/bin:"));
        assert_eq!(
            dirs,
            vec![PathBuf::from("/usr/bin"), PathBuf::from("/opt/bin")]
        );
    }
}
