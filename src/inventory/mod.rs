//! Scan results.
//!
//! - [`reconcile`] - Runs locate, inspect, and upstream lookup per resource
//! - [`hierarchy`] - Directory trees and prefix counts for the report

pub mod hierarchy;
pub mod reconcile;

pub use hierarchy::{segments, Hierarchy, HierarchyNode, PathCounts};
pub use reconcile::{
    CoveredDirectories, DiscoveredPath, Inventory, Reconciler, ResourceResult, ScanProgress,
};
