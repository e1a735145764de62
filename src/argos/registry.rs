use std::collections::HashSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

use super::index::{PackageEntry, PackageMetadata, fetch_index};
use crate::config::Settings;
use crate::translation::{LanguagePair, ModelRegistry, TranslateError};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Argos packages on local disk plus the remote package index.
///
/// Each installed package is a directory under `packages_dir` holding a
/// `metadata.json` that names its language pair.
pub struct ArgosRegistry {
    packages_dir: PathBuf,
    index_url: String,
    index_cache: PathBuf,
    index: Mutex<Vec<PackageEntry>>,
}

impl ArgosRegistry {
    pub fn new(packages_dir: PathBuf, index_url: String, index_cache: PathBuf) -> Self {
        Self {
            packages_dir,
            index_url,
            index_cache,
            index: Mutex::new(Vec::new()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.packages_dir.clone(),
            settings.index_url.clone(),
            settings.index_cache.clone(),
        )
    }

    pub fn packages_dir(&self) -> &Path {
        &self.packages_dir
    }

    // A blocking client owns a runtime of its own, so it is built and dropped
    // on the calling worker thread rather than stored.
    fn client() -> Result<reqwest::blocking::Client, TranslateError> {
        reqwest::blocking::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| TranslateError::registry(format!("failed to create HTTP client: {e}")))
    }

    fn refresh(&self) -> Result<Vec<PackageEntry>, TranslateError> {
        let entries = fetch_index(&Self::client()?, &self.index_url, &self.index_cache)?;
        *self.index.lock().unwrap_or_else(PoisonError::into_inner) = entries.clone();
        Ok(entries)
    }

    fn find_entry(&self, pair: &LanguagePair) -> Result<PackageEntry, TranslateError> {
        let cached = self
            .index
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|e| e.pair() == *pair)
            .cloned();

        match cached {
            Some(entry) => Ok(entry),
            None => self
                .refresh()?
                .into_iter()
                .find(|e| e.pair() == *pair)
                .ok_or_else(|| TranslateError::ModelUnavailable { pair: pair.clone() }),
        }
    }

    fn install(&self, pair: &LanguagePair, link: &str, staging: &Path) -> Result<(), TranslateError> {
        fs::create_dir_all(staging).map_err(|e| install_error(pair, "create staging dir", &e))?;

        let archive_path = staging.join("package.argosmodel");
        info!(%pair, url = link, "Downloading package");
        download(link, &archive_path).map_err(|e| install_error(pair, "download", &e))?;

        let unpacked = staging.join("unpacked");
        let file = File::open(&archive_path).map_err(|e| install_error(pair, "open archive", &e))?;
        zip::ZipArchive::new(file)
            .and_then(|mut archive| archive.extract(&unpacked))
            .map_err(|e| install_error(pair, "extract archive", &e))?;

        let package = find_package_dir(&unpacked, pair)?;
        let Some(name) = package.file_name() else {
            return Err(install_error(pair, "locate package", &"unnamed package directory"));
        };
        let dest = self.packages_dir.join(name);
        if dest.exists() {
            fs::remove_dir_all(&dest).map_err(|e| install_error(pair, "replace package", &e))?;
        }
        fs::rename(&package, &dest).map_err(|e| install_error(pair, "move package", &e))?;

        debug!(%pair, path = %dest.display(), "Package installed");
        Ok(())
    }
}

impl ModelRegistry for ArgosRegistry {
    fn installed_pairs(&self) -> Result<HashSet<LanguagePair>, TranslateError> {
        let entries = match fs::read_dir(&self.packages_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => {
                return Err(TranslateError::registry(format!(
                    "failed to read packages dir {}: {e}",
                    self.packages_dir.display()
                )));
            }
        };

        Ok(entries
            .filter_map(Result::ok)
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .filter_map(|entry| read_metadata(&entry.path()))
            .collect())
    }

    fn available_packages(&self) -> Result<Vec<LanguagePair>, TranslateError> {
        Ok(self.refresh()?.iter().map(PackageEntry::pair).collect())
    }

    fn download_install(&self, pair: &LanguagePair) -> Result<(), TranslateError> {
        let entry = self.find_entry(pair)?;
        let link = entry.links.first().ok_or_else(|| {
            TranslateError::registry(format!("package for {pair} has no download link"))
        })?;

        fs::create_dir_all(&self.packages_dir).map_err(|e| install_error(pair, "create packages dir", &e))?;
        let staging = self
            .packages_dir
            .join(format!(".staging-{}-{}", entry.from_code, entry.to_code));
        let _ = fs::remove_dir_all(&staging);

        let result = self.install(pair, link, &staging);
        let _ = fs::remove_dir_all(&staging);
        result
    }
}

fn download(url: &str, dest: &Path) -> Result<u64, String> {
    let mut response = ArgosRegistry::client()
        .map_err(|e| e.to_string())?
        .get(url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|e| e.to_string())?;

    let mut file = File::create(dest).map_err(|e| e.to_string())?;
    io::copy(&mut response, &mut file).map_err(|e| e.to_string())
}

/// Returns the single package directory inside an unpacked archive.
fn find_package_dir(unpacked: &Path, pair: &LanguagePair) -> Result<PathBuf, TranslateError> {
    let entries =
        fs::read_dir(unpacked).map_err(|e| install_error(pair, "read archive contents", &e))?;

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if read_metadata(&path).as_ref() == Some(pair) {
            return Ok(path);
        }
    }
    Err(install_error(
        pair,
        "verify archive",
        &"no package directory with matching metadata.json",
    ))
}

fn read_metadata(package_dir: &Path) -> Option<LanguagePair> {
    let contents = fs::read_to_string(package_dir.join("metadata.json")).ok()?;
    match serde_json::from_str::<PackageMetadata>(&contents) {
        Ok(meta) => Some(LanguagePair::new(meta.from_code, meta.to_code)),
        Err(e) => {
            debug!(path = %package_dir.display(), "Skipping package with bad metadata: {e}");
            None
        }
    }
}

fn install_error(pair: &LanguagePair, step: &str, detail: &dyn std::fmt::Display) -> TranslateError {
    TranslateError::registry(format!("failed to install {pair} ({step}): {detail}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn registry(temp_dir: &TempDir) -> ArgosRegistry {
        ArgosRegistry::new(
            temp_dir.path().join("packages"),
            "http://127.0.0.1:9/index.json".to_string(),
            temp_dir.path().join("cache").join("index.json"),
        )
    }

    fn write_package(dir: &Path, name: &str, from: &str, to: &str) {
        let package = dir.join(name);
        fs::create_dir_all(&package).unwrap();
        fs::write(
            package.join("metadata.json"),
            format!(r#"{{"package_version": "1.9", "from_code": "{from}", "to_code": "{to}"}}"#),
        )
        .unwrap();
    }

    #[test]
    fn test_installed_pairs_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();

        assert!(registry(&temp_dir).installed_pairs().unwrap().is_empty());
    }

    #[test]
    fn test_installed_pairs_reads_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let registry = registry(&temp_dir);
        write_package(registry.packages_dir(), "translate-en_es-1_9", "en", "es");
        write_package(registry.packages_dir(), "translate-es_en-1_9", "es", "en");
        write_package(registry.packages_dir(), ".staging-en-de", "en", "de");
        fs::create_dir_all(registry.packages_dir().join("broken")).unwrap();
        fs::write(registry.packages_dir().join("broken").join("metadata.json"), "{").unwrap();

        let pairs = registry.installed_pairs().unwrap();

        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&LanguagePair::new("en", "es")));
        assert!(pairs.contains(&LanguagePair::new("es", "en")));
    }

    #[test]
    fn test_find_package_dir_checks_pair() {
        let temp_dir = TempDir::new().unwrap();
        write_package(temp_dir.path(), "translate-en_fr-1_0", "en", "fr");

        let found = find_package_dir(temp_dir.path(), &LanguagePair::new("en", "fr")).unwrap();
        assert!(found.ends_with("translate-en_fr-1_0"));

        assert!(find_package_dir(temp_dir.path(), &LanguagePair::new("fr", "en")).is_err());
    }

    #[test]
    fn test_extracts_argosmodel_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("model.argosmodel");
        {
            let file = File::create(&archive_path).unwrap();
            let mut zip = zip::ZipWriter::new(file);
            let options = zip::write::FileOptions::default();
            zip.add_directory("translate-en_it-1_0/", options).unwrap();
            zip.start_file("translate-en_it-1_0/metadata.json", options).unwrap();
            zip.write_all(br#"{"from_code": "en", "to_code": "it"}"#).unwrap();
            zip.finish().unwrap();
        }
        let unpacked = temp_dir.path().join("unpacked");

        zip::ZipArchive::new(File::open(&archive_path).unwrap())
            .unwrap()
            .extract(&unpacked)
            .unwrap();

        let package = find_package_dir(&unpacked, &LanguagePair::new("en", "it")).unwrap();
        assert_eq!(read_metadata(&package), Some(LanguagePair::new("en", "it")));
    }

    #[test]
    fn test_failed_install_leaves_nothing_behind() {
        let temp_dir = TempDir::new().unwrap();
        let registry = registry(&temp_dir);
        *registry.index.lock().unwrap() = vec![PackageEntry {
            from_code: "en".to_string(),
            to_code: "pl".to_string(),
            package_version: Some("1.0".to_string()),
            links: vec!["http://127.0.0.1:9/translate-en_pl.argosmodel".to_string()],
        }];

        let result = registry.download_install(&LanguagePair::new("en", "pl"));

        assert!(matches!(result, Err(TranslateError::Registry(_))));
        assert_eq!(fs::read_dir(registry.packages_dir()).unwrap().count(), 0);
        assert!(registry.installed_pairs().unwrap().is_empty());
    }

    #[test]
    fn test_entry_without_link_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let registry = registry(&temp_dir);
        *registry.index.lock().unwrap() = vec![PackageEntry {
            from_code: "en".to_string(),
            to_code: "sv".to_string(),
            package_version: None,
            links: Vec::new(),
        }];

        let err = registry
            .download_install(&LanguagePair::new("en", "sv"))
            .unwrap_err();

        assert!(err.to_string().contains("no download link"));
    }
}
