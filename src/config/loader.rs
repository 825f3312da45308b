//! Configuration file discovery and loading.
//!
//! This module handles finding and loading the configuration file from
//! the supported locations in priority order.

use crate::config::schema::ScanConfig;
use crate::config::validator::validate;
use crate::error::{Result, ToolprobeError};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "toolprobe.yml";

/// Candidate configuration locations, first existing one wins.
///
/// Lookup order:
/// 1. Explicit `--config` path (must exist)
/// 2. Working directory (`./toolprobe.yml`)
/// 3. User config (`<config_dir>/toolprobe/config.yml`)
/// 4. Built-in defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config: ./toolprobe.yml
    pub project: Option<PathBuf>,

    /// User's global config: <config_dir>/toolprobe/config.yml
    pub user_global: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files relative to the given working directory.
    pub fn discover(working_dir: &Path) -> Self {
        Self {
            project: Self::find_project_config(working_dir),
            user_global: Self::find_user_global(),
        }
    }

    fn find_project_config(working_dir: &Path) -> Option<PathBuf> {
        let path = working_dir.join(PROJECT_CONFIG_FILE);
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }

    fn find_user_global() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("toolprobe").join("config.yml");
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }

    /// The highest-priority existing config file, if any.
    pub fn first_existing(&self) -> Option<&PathBuf> {
        self.project.as_ref().or(self.user_global.as_ref())
    }
}

/// Load a single config file and parse it into [`ScanConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ScanConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ToolprobeError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ToolprobeError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`ScanConfig`].
///
/// An empty document yields the built-in defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ScanConfig> {
    if content.trim().is_empty() {
        return Ok(ScanConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ToolprobeError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate the configuration.
///
/// If `config_override` is provided, only that file is read. Otherwise the
/// first discovered file is used, falling back to built-in defaults.
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<ScanConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => match ConfigPaths::discover(working_dir).first_existing() {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                load_config_file(path)?
            }
            None => {
                tracing::debug!("No config file found, using built-in resources");
                ScanConfig::default()
            }
        },
    };

    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SIMPLE_CONFIG: &str = r#"
settings:
  http_timeout_secs: 5
resources:
  - name: node
    url: https://nodejs.org/en/
  - name: java
    version_flag: -version
    url: https://www.oracle.com/java/
"#;

    #[test]
    fn discover_finds_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), SIMPLE_CONFIG).unwrap();

        let paths = ConfigPaths::discover(temp.path());
        assert_eq!(
            paths.first_existing(),
            Some(&temp.path().join(PROJECT_CONFIG_FILE))
        );
    }

    #[test]
    fn load_config_file_parses_resources_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, SIMPLE_CONFIG).unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.settings.http_timeout_secs, 5);
        assert_eq!(config.resources[0].name, "node");
        assert_eq!(config.resources[1].version_flag, "-version");
    }

    #[test]
    fn load_config_file_missing_is_not_found() {
        let err = load_config_file(Path::new("/nonexistent/toolprobe.yml")).unwrap_err();
        assert!(matches!(err, ToolprobeError::ConfigNotFound { .. }));
    }

    #[test]
    fn parse_config_reports_invalid_yaml() {
        let err = parse_config("resources: [", Path::new("bad.yml")).unwrap_err();
        assert!(matches!(err, ToolprobeError::ConfigParseError { .. }));
        assert!(err.to_string().contains("bad.yml"));
    }

    #[test]
    fn parse_config_empty_document_is_default() {
        let config = parse_config("  \n", Path::new("empty.yml")).unwrap();
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn load_config_override_takes_precedence() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILE), SIMPLE_CONFIG).unwrap();
        let other = temp.path().join("other.yml");
        fs::write(
            &other,
            "resources:\n  - name: git\n    url: https://git-scm.com/\n",
        )
        .unwrap();

        let config = load_config(temp.path(), Some(&other)).unwrap();
        assert_eq!(config.resources.len(), 1);
        assert_eq!(config.resources[0].name, "git");
    }

    #[test]
    fn load_config_rejects_invalid_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dupes.yml");
        fs::write(
            &path,
            "resources:\n  - name: git\n    url: a\n  - name: git\n    url: b\n",
        )
        .unwrap();

        let err = load_config(temp.path(), Some(&path)).unwrap_err();
        assert!(matches!(err, ToolprobeError::ConfigValidationError { .. }));
    }
}
