//! Argos Translate package index and package metadata.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::fs::atomic_write;
use crate::translation::{LanguagePair, TranslateError};

/// One entry of the remote package index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    pub from_code: String,
    pub to_code: String,
    #[serde(default)]
    pub package_version: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

impl PackageEntry {
    pub fn pair(&self) -> LanguagePair {
        LanguagePair::new(&self.from_code, &self.to_code)
    }
}

/// The `metadata.json` shipped inside every installed package.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageMetadata {
    pub from_code: String,
    pub to_code: String,
}

pub fn parse_index(contents: &str) -> Result<Vec<PackageEntry>, TranslateError> {
    serde_json::from_str(contents)
        .map_err(|e| TranslateError::registry(format!("invalid package index: {e}")))
}

/// Downloads the index from `url`, keeping a copy at `cache_path`.
///
/// When the download fails or returns something that is not an index, and
/// a cached copy exists, the cached copy is used instead.
pub fn fetch_index(
    client: &reqwest::blocking::Client,
    url: &str,
    cache_path: &Path,
) -> Result<Vec<PackageEntry>, TranslateError> {
    let fetched = download_index(client, url)
        .and_then(|contents| parse_index(&contents).map(|entries| (contents, entries)));

    match fetched {
        Ok((contents, entries)) => {
            if let Err(e) = atomic_write(cache_path, &contents) {
                warn!(path = %cache_path.display(), "Could not cache package index: {e}");
            }
            debug!(packages = entries.len(), "Refreshed package index");
            Ok(entries)
        }
        Err(e) => {
            let Ok(cached) = std::fs::read_to_string(cache_path) else {
                return Err(e);
            };
            warn!("{e}; using cached package index");
            parse_index(&cached)
        }
    }
}

fn download_index(client: &reqwest::blocking::Client, url: &str) -> Result<String, TranslateError> {
    client
        .get(url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .and_then(reqwest::blocking::Response::text)
        .map_err(|e| TranslateError::registry(format!("failed to fetch package index {url}: {e}")))
}
