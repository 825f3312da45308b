//! Text report of a scan.
//!
//! The report lists, per resource, the latest published version, every
//! executable path with its version, and the tree of standard-directory
//! discoveries. It ends with the PATH directories the scan never covered
//! and a few environment variables.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use toolprobe::inventory::{CoveredDirectories, Hierarchy, Inventory, ResourceResult};
//! use toolprobe::report::{render_report, EnvSnapshot};
//! use toolprobe::upstream::LatestVersion;
//!
//! let inventory = Inventory {
//!     scanned_at: Utc::now(),
//!     resources: vec![ResourceResult {
//!         name: "git".to_string(),
//!         url: "https://git-scm.com/".to_string(),
//!         latest: LatestVersion::Found { version: "2.45.2".to_string() },
//!         paths: vec![],
//!     }],
//!     covered: CoveredDirectories::new(),
//! };
//!
//! let hierarchy = Hierarchy::build(&inventory);
//! let env = EnvSnapshot::from_fn(|_| None);
//! let lines = render_report(&inventory, &hierarchy, &env);
//! assert_eq!(lines[0], "git: No paths found");
//! ```

pub mod env;

pub use env::{uncovered_path_dirs, EnvSnapshot};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolprobeError};
use crate::inventory::{Hierarchy, Inventory, ResourceResult};

/// Render the full report as lines.
pub fn render_report(
    inventory: &Inventory,
    hierarchy: &Hierarchy,
    env: &EnvSnapshot,
) -> Vec<String> {
    let mut lines = Vec::new();

    for resource in &inventory.resources {
        render_resource(resource, hierarchy, &mut lines);
    }

    let uncovered = env.uncovered_path_dirs(&inventory.covered);
    if !uncovered.is_empty() {
        lines.push("Uncovered PATH Directories:".to_string());
        lines.extend(uncovered.iter().map(|d| format!("  {}", d.display())));
    }
    lines.push(String::new());

    lines.push("Environment Variables:".to_string());
    lines.extend(
        env.display_pairs()
            .map(|(name, value)| format!("  {}: {}", name, value)),
    );

    lines
}

fn render_resource(resource: &ResourceResult, hierarchy: &Hierarchy, lines: &mut Vec<String>) {
    if resource.is_empty() {
        lines.push(format!("{}: No paths found", resource.name));
    } else {
        lines.push(format!("{}: ", resource.name));
    }
    lines.push(format!(
        "\tLatest Available Version: {}  -  {}",
        resource.latest, resource.url
    ));

    for discovered in resource.paths.iter().filter(|p| p.executable) {
        let version = discovered
            .version
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "None".to_string());

        lines.push(format!("\tPath: {}", discovered.path.display()));
        lines.push(format!("\t\t\tExecutable: {}", discovered.executable));
        lines.push(format!("\t\t\tVersion: {}", version));
        lines.push(format!("\t\t\tIn-Path Variable: {}", discovered.in_path));
    }

    lines.extend(hierarchy.render(&resource.name));
    lines.push(String::new());
}

/// Write `lines` joined by newlines to `path`.
pub fn save_report(lines: &[String], path: &Path) -> Result<PathBuf> {
    fs::write(path, lines.join("\n")).map_err(|source| ToolprobeError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Wrote {} report lines to {}", lines.len(), path.display());
    Ok(path.to_path_buf())
}
