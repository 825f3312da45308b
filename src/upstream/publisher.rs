//! Known release publishers and how each one announces its latest version.

use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::fetch::HttpFetcher;
use super::UpstreamError;

/// Placeholder for a field the publisher did not provide.
const UNKNOWN_VERSION: &str = "Unknown version";

/// Secondary endpoints queried after the reference page answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Node.js release index (JSON array, newest first).
    pub node_release_index: String,
    /// npm registry document for the latest npm release.
    pub npm_latest: String,
}

impl Endpoints {
    /// Endpoints from the configured settings.
    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self {
            node_release_index: settings.node_release_index.clone(),
            npm_latest: settings.npm_latest_endpoint.clone(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_settings(&crate::config::Settings::default())
    }
}

/// A release publisher with a dedicated lookup strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Publisher {
    /// nodejs.org: newest entry of the release index.
    NodeJs,
    /// python.org: release marker on the reference page.
    Python,
    /// npmjs: registry "latest" document.
    Npm,
}

impl Publisher {
    /// Pick the publisher owning `url`'s host, if it is a known one.
    pub fn detect(url: &str) -> Option<Self> {
        let url = Url::parse(url).ok()?;
        let host = url.host_str()?.to_ascii_lowercase();
        let owns = |domain: &str| host == domain || host.ends_with(&format!(".{}", domain));

        if owns("nodejs.org") {
            Some(Publisher::NodeJs)
        } else if owns("python.org") {
            Some(Publisher::Python)
        } else if owns("npmjs.com") || owns("npmjs.org") {
            Some(Publisher::Npm)
        } else {
            None
        }
    }

    /// Resolve the latest version once the reference page at `url` has
    /// answered with `landing_page`.
    pub fn latest(
        &self,
        fetcher: &HttpFetcher,
        endpoints: &Endpoints,
        url: &str,
        landing_page: &str,
    ) -> Result<String, UpstreamError> {
        match self {
            Publisher::NodeJs => {
                let index = fetcher.get_json(&endpoints.node_release_index)?;
                parse_node_index(&index).ok_or_else(|| UpstreamError::Parse {
                    url: endpoints.node_release_index.clone(),
                    message: "release index is empty".to_string(),
                })
            }
            Publisher::Python => {
                parse_release_marker(landing_page).ok_or_else(|| UpstreamError::Parse {
                    url: url.to_string(),
                    message: "no release-number marker on page".to_string(),
                })
            }
            Publisher::Npm => {
                let latest = fetcher.get_json(&endpoints.npm_latest)?;
                Ok(parse_registry_latest(&latest))
            }
        }
    }
}

/// `"{version} ({date})"` from the first entry of a Node.js release index.
pub fn parse_node_index(index: &serde_json::Value) -> Option<String> {
    let newest = index.as_array()?.first()?;
    let field = |name: &str| newest[name].as_str().unwrap_or(UNKNOWN_VERSION).to_string();
    Some(format!("{} ({})", field("version"), field("date")))
}

/// Text of the first `<span class="release-number">` element, tags removed.
pub fn parse_release_marker(html: &str) -> Option<String> {
    let marker = Regex::new(r#"(?s)<span class="release-number">(.*?)</span>"#).ok()?;
    let inner = marker.captures(html)?.get(1)?.as_str();

    let text = match Regex::new(r"<[^>]*>") {
        Ok(tag) => tag.replace_all(inner, "").into_owned(),
        Err(_) => inner.to_string(),
    };
    Some(text.trim().to_string())
}

/// `version` field of a registry "latest" document.
pub fn parse_registry_latest(doc: &serde_json::Value) -> String {
    doc["version"]
        .as_str()
        .unwrap_or(UNKNOWN_VERSION)
        .to_string()
}
