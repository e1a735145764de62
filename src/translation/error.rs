use thiserror::Error;

use super::LanguagePair;

/// Errors from model provisioning and translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The package index has no model for this pair. Retrying will not help
    /// until the remote index changes.
    #[error("No Argos Translate model found for {pair}.")]
    ModelUnavailable { pair: LanguagePair },

    /// Reading the installed packages, fetching the index, downloading or
    /// installing a package failed.
    #[error("Model registry error: {0}")]
    Registry(String),

    /// The translation engine itself failed.
    #[error("{0}")]
    Engine(String),
}

impl TranslateError {
    pub fn registry(detail: impl std::fmt::Display) -> Self {
        Self::Registry(detail.to_string())
    }

    pub fn engine(detail: impl std::fmt::Display) -> Self {
        Self::Engine(detail.to_string())
    }
}
