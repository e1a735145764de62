//! On-demand model provisioning.
//!
//! [`ModelCache::ensure`] is a two-tier lookup: the locally installed
//! packages are checked first and only a miss pays for a package index
//! refresh and a download.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use super::{LanguagePair, ModelRegistry, TranslateError};

/// Result of preinstalling one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreinstallStatus {
    Installed,
    AlreadyInstalled,
    Unavailable,
    Failed(String),
}

/// Ensures translation models are installed before they are used.
pub struct ModelCache {
    registry: Arc<dyn ModelRegistry>,
    gates: Mutex<HashMap<LanguagePair, Arc<Mutex<()>>>>,
}

impl ModelCache {
    pub fn new(registry: Arc<dyn ModelRegistry>) -> Self {
        Self {
            registry,
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Makes sure a model for `pair` is installed, installing it if needed.
    ///
    /// Returns without touching the network when the pair is already
    /// installed. Concurrent calls for the same pair are serialized, so only
    /// the first one downloads; the others find the pair installed.
    ///
    /// # Errors
    ///
    /// [`TranslateError::ModelUnavailable`] if the refreshed index has no
    /// package for the pair, or a registry error if the refresh, download or
    /// install fails.
    pub fn ensure(&self, pair: &LanguagePair) -> Result<(), TranslateError> {
        if pair.is_identity() || self.is_installed(pair)? {
            return Ok(());
        }

        let gate = self.gate(pair);
        let _guard = gate.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have installed it while we waited.
        if self.is_installed(pair)? {
            debug!(%pair, "Model installed by a concurrent request");
            return Ok(());
        }

        info!(%pair, "Model not installed, refreshing package index");
        let available = self.registry.available_packages()?;
        if !available.contains(pair) {
            warn!(%pair, "No package for pair in the index");
            return Err(TranslateError::ModelUnavailable { pair: pair.clone() });
        }

        self.registry.download_install(pair)?;
        info!(%pair, "Model installed");
        Ok(())
    }

    /// Installs each of `pairs`, best effort.
    ///
    /// The index is refreshed at most once. A failure for one pair is
    /// recorded and the remaining pairs are still attempted.
    pub fn preinstall(&self, pairs: &[LanguagePair]) -> Vec<(LanguagePair, PreinstallStatus)> {
        self.preinstall_each(pairs, |_, _| {})
    }

    /// Like [`ModelCache::preinstall`], calling `on_done` as each pair finishes.
    pub fn preinstall_each(
        &self,
        pairs: &[LanguagePair],
        mut on_done: impl FnMut(&LanguagePair, &PreinstallStatus),
    ) -> Vec<(LanguagePair, PreinstallStatus)> {
        let installed = match self.registry.installed_pairs() {
            Ok(installed) => installed,
            Err(e) => {
                warn!("Could not list installed models: {e}");
                HashSet::new()
            }
        };

        let missing: Vec<&LanguagePair> = pairs
            .iter()
            .filter(|p| !p.is_identity() && !installed.contains(*p))
            .collect();

        let available = if missing.is_empty() {
            Ok(Vec::new())
        } else {
            self.registry.available_packages()
        };

        pairs
            .iter()
            .map(|pair| {
                let status = if missing.contains(&pair) {
                    match &available {
                        Err(e) => PreinstallStatus::Failed(e.to_string()),
                        Ok(available) if !available.contains(pair) => {
                            PreinstallStatus::Unavailable
                        }
                        Ok(_) => self.install_gated(pair),
                    }
                } else {
                    PreinstallStatus::AlreadyInstalled
                };
                log_preinstall(pair, &status);
                on_done(pair, &status);
                (pair.clone(), status)
            })
            .collect()
    }

    /// Lists the language codes appearing in installed pairs, sorted.
    pub fn installed_languages(&self) -> Result<Vec<String>, TranslateError> {
        let codes: BTreeSet<String> = self
            .registry
            .installed_pairs()?
            .into_iter()
            .flat_map(|pair| [pair.src, pair.dst])
            .collect();
        Ok(codes.into_iter().collect())
    }

    fn install_gated(&self, pair: &LanguagePair) -> PreinstallStatus {
        let gate = self.gate(pair);
        let _guard = gate.lock().unwrap_or_else(PoisonError::into_inner);

        if matches!(self.is_installed(pair), Ok(true)) {
            return PreinstallStatus::AlreadyInstalled;
        }
        match self.registry.download_install(pair) {
            Ok(()) => PreinstallStatus::Installed,
            Err(e) => PreinstallStatus::Failed(e.to_string()),
        }
    }

    fn is_installed(&self, pair: &LanguagePair) -> Result<bool, TranslateError> {
        Ok(self.registry.installed_pairs()?.contains(pair))
    }

    fn gate(&self, pair: &LanguagePair) -> Arc<Mutex<()>> {
        let mut gates = self.gates.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(gates.entry(pair.clone()).or_default())
    }
}

fn log_preinstall(pair: &LanguagePair, status: &PreinstallStatus) {
    match status {
        PreinstallStatus::Installed => info!(%pair, "Preinstalled model"),
        PreinstallStatus::AlreadyInstalled => debug!(%pair, "Model already installed"),
        PreinstallStatus::Unavailable => warn!(%pair, "No package to preinstall"),
        PreinstallStatus::Failed(e) => warn!(%pair, "Preinstall failed: {e}"),
    }
}
