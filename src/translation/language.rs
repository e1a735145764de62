//! Language codes, language pairs and detection results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Codes suggested to users choosing a target language (ISO 639-1).
pub const COMMON_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "nl", "pl", "ru", "ja", "ko", "zh",
];

/// An ordered translation direction, `src` into `dst`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LanguagePair {
    pub src: String,
    pub dst: String,
}

impl LanguagePair {
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Returns `true` when source and destination are the same language.
    pub fn is_identity(&self) -> bool {
        self.src == self.dst
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.src, self.dst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid language pair '{0}', expected 'src->dst'")]
pub struct ParsePairError(String);

impl FromStr for LanguagePair {
    type Err = ParsePairError;

    /// Parses `src->dst`, trimming whitespace around both codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (src, dst) = s
            .split_once("->")
            .ok_or_else(|| ParsePairError(s.to_string()))?;
        let (src, dst) = (src.trim(), dst.trim());

        if src.is_empty() || dst.is_empty() || dst.contains("->") {
            return Err(ParsePairError(s.to_string()));
        }
        Ok(Self::new(src, dst))
    }
}

/// Parses a comma-separated list of `src->dst` pairs.
///
/// Malformed entries are dropped; duplicates keep their first position.
pub fn parse_pair_list(list: &str) -> Vec<LanguagePair> {
    let mut pairs: Vec<LanguagePair> = Vec::new();
    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.parse::<LanguagePair>() {
            Ok(pair) if !pairs.contains(&pair) => pairs.push(pair),
            Ok(_) => {}
            Err(e) => tracing::warn!("Ignoring preinstall entry: {e}"),
        }
    }
    pairs
}

/// Outcome of running language detection on a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// ISO 639-1 code of the detected language.
    Language(String),
    /// The detector could not decide.
    Unknown,
}
