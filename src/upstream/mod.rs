//! Latest published versions.
//!
//! The reference page of a resource is fetched first; if it answers, the
//! publisher owning the URL decides how to read the newest release
//! (a JSON release index, a marker on the page itself, or a registry
//! document). Every failure is returned as an [`UpstreamError`] value so a
//! single unreachable site never stops the scan.
//!
//! # Modules
//!
//! - [`fetch`] - Blocking HTTP client wrapper
//! - [`publisher`] - Publisher detection and per-publisher parsing

pub mod fetch;
pub mod publisher;

pub use fetch::HttpFetcher;
pub use publisher::{Endpoints, Publisher};

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::config::{ResourceConfig, Settings};

/// Why the latest version could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpstreamError {
    /// The server answered with something other than 200.
    #[error("Failed to fetch version from {url}")]
    Status { url: String, status: u16 },

    /// DNS, connection, TLS, timeout, or body transfer failure.
    #[error("Error fetching data: {message}")]
    Network { url: String, message: String },

    /// The response did not contain the expected release data.
    #[error("Could not read release data from {url}: {message}")]
    Parse { url: String, message: String },

    /// No lookup strategy exists for this URL.
    #[error("Latest version info not found")]
    UnknownPublisher { url: String },
}

impl UpstreamError {
    /// Classify a transport error for `url`.
    pub fn network(url: &str, err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request to {} timed out", url)
        } else {
            err.to_string()
        };

        UpstreamError::Network {
            url: url.to_string(),
            message,
        }
    }
}

/// Latest version of a resource, or why it is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LatestVersion {
    Found { version: String },
    Unavailable { reason: UpstreamError },
}

impl LatestVersion {
    /// The found version, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            LatestVersion::Found { version } => Some(version),
            LatestVersion::Unavailable { .. } => None,
        }
    }
}

impl fmt::Display for LatestVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatestVersion::Found { version } => write!(f, "{}", version),
            LatestVersion::Unavailable { reason } => write!(f, "{}", reason),
        }
    }
}

impl From<Result<String, UpstreamError>> for LatestVersion {
    fn from(result: Result<String, UpstreamError>) -> Self {
        match result {
            Ok(version) => LatestVersion::Found { version },
            Err(reason) => LatestVersion::Unavailable { reason },
        }
    }
}

/// Resolves the latest published version of a resource.
pub trait ResolveLatest {
    /// Look up the newest release announced at the resource's URL.
    fn fetch_latest(&self, resource: &ResourceConfig) -> LatestVersion;
}

/// Resolver that talks to the real publishers.
#[derive(Debug, Clone)]
pub struct UpstreamResolver {
    fetcher: HttpFetcher,
    endpoints: Endpoints,
}

impl UpstreamResolver {
    /// Create a resolver from the configured timeout and endpoints.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let timeout = std::time::Duration::from_secs(settings.http_timeout_secs);
        Ok(Self::new(
            HttpFetcher::with_timeout(timeout)?,
            Endpoints::from_settings(settings),
        ))
    }

    /// Create a resolver with an explicit fetcher and endpoints.
    pub fn new(fetcher: HttpFetcher, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    /// Fetch the reference page, then apply the publisher's strategy.
    pub fn resolve(&self, resource: &ResourceConfig) -> Result<String, UpstreamError> {
        let url = resource.url.as_str();
        let landing_page = self.fetcher.get_text(url)?;

        let publisher = resource
            .publisher
            .or_else(|| Publisher::detect(url))
            .ok_or_else(|| UpstreamError::UnknownPublisher {
                url: url.to_string(),
            })?;

        tracing::debug!("Resolving latest {} via {:?}", resource.name, publisher);
        publisher.latest(&self.fetcher, &self.endpoints, url, &landing_page)
    }
}

impl ResolveLatest for UpstreamResolver {
    fn fetch_latest(&self, resource: &ResourceConfig) -> LatestVersion {
        let result = self.resolve(resource);
        if let Err(e) = &result {
            tracing::warn!("Latest {} unavailable: {}", resource.name, e);
        }
        LatestVersion::from(result)
    }
}
