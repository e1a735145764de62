//! Contracts for the external collaborators of the translation core.
//!
//! All methods are blocking. Callers on the async runtime run them through
//! `tokio::task::spawn_blocking`.

use std::collections::HashSet;

use super::{Detection, LanguagePair, TranslateError};

/// Identifies the language of a text.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Detection;
}

/// Installed and installable translation models.
pub trait ModelRegistry: Send + Sync {
    /// Pairs with a model present in local storage. Must not touch the network.
    fn installed_pairs(&self) -> Result<HashSet<LanguagePair>, TranslateError>;

    /// Refreshes the remote package index and returns the pairs it offers.
    fn available_packages(&self) -> Result<Vec<LanguagePair>, TranslateError>;

    /// Downloads and installs the package for `pair`.
    ///
    /// Either the package ends up fully installed or nothing is left behind.
    fn download_install(&self, pair: &LanguagePair) -> Result<(), TranslateError>;
}

/// Translates text with an installed model.
pub trait TranslationEngine: Send + Sync {
    fn translate(&self, pair: &LanguagePair, text: &str) -> Result<String, TranslateError>;
}
