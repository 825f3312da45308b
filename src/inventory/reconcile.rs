//! Per-resource reconciliation of located, inspected, and published versions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{ResourceConfig, ScanConfig};
use crate::discovery::{Candidate, Inspect, Locate, VersionReading};
use crate::upstream::{LatestVersion, ResolveLatest};

/// One candidate path after inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredPath {
    pub path: PathBuf,
    pub executable: bool,
    /// `None` when the path was not executable.
    pub version: Option<VersionReading>,
    pub in_path: bool,
}

/// Everything learned about one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceResult {
    pub name: String,
    pub url: String,
    pub latest: LatestVersion,
    /// Unique by path, in discovery order.
    pub paths: Vec<DiscoveredPath>,
}

impl ResourceResult {
    /// An empty result for `resource` with the given latest version.
    pub fn new(resource: &ResourceConfig, latest: LatestVersion) -> Self {
        Self {
            name: resource.name.clone(),
            url: resource.url.clone(),
            latest,
            paths: Vec::new(),
        }
    }

    /// Record a discovery. A path seen before has its attributes replaced
    /// but keeps its first position.
    pub fn record(&mut self, discovered: DiscoveredPath) {
        match self.paths.iter_mut().find(|p| p.path == discovered.path) {
            Some(existing) => *existing = discovered,
            None => self.paths.push(discovered),
        }
    }

    /// Look up a recorded path.
    pub fn path(&self, path: &Path) -> Option<&DiscoveredPath> {
        self.paths.iter().find(|p| p.path == path)
    }

    /// Whether nothing was found for this resource.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Directories reached by the standard-directory scan, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CoveredDirectories {
    dirs: Vec<PathBuf>,
}

impl CoveredDirectories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory; duplicates are ignored.
    pub fn insert(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.contains(&dir) {
            self.dirs.push(dir);
        }
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Result of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub scanned_at: DateTime<Utc>,
    /// In configuration order.
    pub resources: Vec<ResourceResult>,
    pub covered: CoveredDirectories,
}

impl Inventory {
    /// Look up a resource result by name.
    pub fn resource(&self, name: &str) -> Option<&ResourceResult> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Every discovered path across all resources.
    pub fn all_paths(&self) -> impl Iterator<Item = &DiscoveredPath> {
        self.resources.iter().flat_map(|r| r.paths.iter())
    }
}

/// Notified around each resource while a scan runs.
pub trait ScanProgress {
    fn resource_started(&mut self, _resource: &ResourceConfig) {}

    fn resource_finished(&mut self, _result: &ResourceResult) {}
}

impl ScanProgress for () {}

/// Drives discovery for every configured resource.
///
/// The locator, inspector, and resolver are injected so the engine can run
/// against fakes.
pub struct Reconciler<'a> {
    config: &'a ScanConfig,
    locator: &'a dyn Locate,
    inspector: &'a dyn Inspect,
    resolver: &'a dyn ResolveLatest,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        config: &'a ScanConfig,
        locator: &'a dyn Locate,
        inspector: &'a dyn Inspect,
        resolver: &'a dyn ResolveLatest,
    ) -> Self {
        Self {
            config,
            locator,
            inspector,
            resolver,
        }
    }

    /// Reconcile every resource, in configuration order.
    pub fn reconcile(&self, include_standard_dirs: bool) -> Inventory {
        self.reconcile_with_progress(include_standard_dirs, &mut ())
    }

    /// Like [`reconcile`](Self::reconcile), reporting each resource to
    /// `progress` before and after it is scanned.
    pub fn reconcile_with_progress(
        &self,
        include_standard_dirs: bool,
        progress: &mut dyn ScanProgress,
    ) -> Inventory {
        let mut covered = CoveredDirectories::new();
        let mut resources = Vec::with_capacity(self.config.resources.len());

        for resource in &self.config.resources {
            progress.resource_started(resource);
            let result = self.reconcile_resource(resource, include_standard_dirs, &mut covered);
            progress.resource_finished(&result);
            resources.push(result);
        }

        Inventory {
            scanned_at: Utc::now(),
            resources,
            covered,
        }
    }

    /// Reconcile a single resource, adding the parent directory of every
    /// standard-directory discovery to `covered`.
    pub fn reconcile_resource(
        &self,
        resource: &ResourceConfig,
        include_standard_dirs: bool,
        covered: &mut CoveredDirectories,
    ) -> ResourceResult {
        tracing::info!("Scanning {}", resource.name);

        let latest = self.resolver.fetch_latest(resource);
        let mut result = ResourceResult::new(resource, latest);

        let candidates = self.locator.locate(&resource.name, include_standard_dirs);
        for Candidate { path, in_path } in candidates {
            let inspection = self.inspector.inspect(&path, &resource.version_flag);

            if !in_path {
                if let Some(parent) = path.parent() {
                    covered.insert(parent);
                }
            }

            result.record(DiscoveredPath {
                path,
                executable: inspection.executable,
                version: inspection.version,
                in_path,
            });
        }

        tracing::debug!("{}: {} path(s)", resource.name, result.paths.len());
        result
    }
}
