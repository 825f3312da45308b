//! Configuration schema definitions for toolprobe.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format, plus the built-in defaults used when no
//! configuration file exists.

use serde::{Deserialize, Serialize};

use crate::upstream::Publisher;

/// Root configuration structure for `toolprobe.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Global settings
    pub settings: Settings,

    /// Resources to inventory, in report order
    pub resources: Vec<ResourceConfig>,

    /// Install-root glob patterns searched when standard-directory
    /// scanning is enabled
    pub standard_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            resources: default_resources(),
            standard_dirs: default_standard_dirs(),
        }
    }
}

impl ScanConfig {
    /// Look up a resource by name.
    pub fn resource(&self, name: &str) -> Option<&ResourceConfig> {
        self.resources.iter().find(|r| r.name == name)
    }
}

/// Global settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Also glob the standard install roots (slow on large trees)
    pub search_standard_dirs: bool,

    /// Timeout for every upstream HTTP request
    pub http_timeout_secs: u64,

    /// Report file name, relative to the working directory
    pub report_file: String,

    /// Release index read for Node.js
    pub node_release_index: String,

    /// Registry endpoint read for npm
    pub npm_latest_endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_standard_dirs: false,
            http_timeout_secs: 30,
            report_file: "resource_report.txt".to_string(),
            node_release_index: "https://nodejs.org/dist/index.json".to_string(),
            npm_latest_endpoint: "https://registry.npmjs.org/npm/latest".to_string(),
        }
    }
}

/// A single inventoried tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Command name looked up on PATH and in install roots
    pub name: String,

    /// Argument that makes the tool print its version
    #[serde(default = "default_version_flag")]
    pub version_flag: String,

    /// Reference page for the latest published release
    pub url: String,

    /// Publisher override; detected from `url` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Publisher>,

    /// Upgrade command (program followed by arguments)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub upgrade: Vec<String>,
}

impl ResourceConfig {
    /// Create a resource with the default `--version` flag.
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            version_flag: default_version_flag(),
            url: url.to_string(),
            publisher: None,
            upgrade: Vec::new(),
        }
    }

    /// Set the version flag.
    pub fn with_version_flag(mut self, flag: &str) -> Self {
        self.version_flag = flag.to_string();
        self
    }

    /// Pin the publisher instead of detecting it from the URL.
    pub fn with_publisher(mut self, publisher: Publisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Set the upgrade command.
    pub fn with_upgrade(mut self, argv: &[&str]) -> Self {
        self.upgrade = argv.iter().map(|s| s.to_string()).collect();
        self
    }
}

fn default_version_flag() -> String {
    "--version".to_string()
}

fn default_resources() -> Vec<ResourceConfig> {
    vec![
        ResourceConfig::new("node", "https://nodejs.org/en/").with_upgrade(&[
            "npm", "install", "-g", "npm",
        ]),
        ResourceConfig::new("npm", "https://www.npmjs.com/").with_upgrade(&[
            "npm", "install", "-g", "npm",
        ]),
        ResourceConfig::new(
            "java",
            "https://www.oracle.com/java/technologies/javase-jdk11-downloads.html",
        )
        .with_version_flag("-version"),
        ResourceConfig::new("python", "https://www.python.org/downloads/").with_upgrade(&[
            "python", "-m", "pip", "install", "--upgrade", "pip",
        ]),
        ResourceConfig::new("git", "https://git-scm.com/").with_upgrade(&["git", "self-update"]),
    ]
}

fn default_standard_dirs() -> Vec<String> {
    [
        "C:\\Program Files",
        "C:\\Program Files (x86)",
        "C:\\Users\\*\\AppData\\Local",
        "/usr/bin",
        "/usr/local/bin",
        "/opt",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
