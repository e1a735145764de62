//! In-memory collaborators for unit tests.
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::{Condvar, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Detection, LanguageDetector, LanguagePair, ModelRegistry, TranslateError, TranslationEngine};

#[derive(Default)]
pub struct FakeRegistry {
    pub installed: Mutex<HashSet<LanguagePair>>,
    pub available: Vec<LanguagePair>,
    pub broken: Vec<LanguagePair>,
    pub index_down: bool,
    pub refreshes: AtomicUsize,
    pub installs: AtomicUsize,
}

impl FakeRegistry {
    pub fn with_available(pairs: &[(&str, &str)]) -> Self {
        Self {
            available: pairs.iter().map(|(s, d)| LanguagePair::new(*s, *d)).collect(),
            ..Self::default()
        }
    }

    pub fn install_now(&self, src: &str, dst: &str) {
        self.installed.lock().unwrap().insert(LanguagePair::new(src, dst));
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    pub fn installs(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }
}

impl ModelRegistry for FakeRegistry {
    fn installed_pairs(&self) -> Result<HashSet<LanguagePair>, TranslateError> {
        Ok(self.installed.lock().unwrap().clone())
    }

    fn available_packages(&self) -> Result<Vec<LanguagePair>, TranslateError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        if self.index_down {
            return Err(TranslateError::registry("index unreachable"));
        }
        Ok(self.available.clone())
    }

    fn download_install(&self, pair: &LanguagePair) -> Result<(), TranslateError> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        if self.broken.contains(pair) {
            return Err(TranslateError::registry(format!("download of {pair} failed")));
        }
        self.installed.lock().unwrap().insert(pair.clone());
        Ok(())
    }
}

/// Uppercases the text and tags it with the pair.
#[derive(Default)]
pub struct FakeEngine {
    pub fail_with: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeEngine {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TranslationEngine for FakeEngine {
    fn translate(&self, pair: &LanguagePair, text: &str) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(detail) = &self.fail_with {
            return Err(TranslateError::engine(detail));
        }
        Ok(format!("[{pair}] {}", text.to_uppercase()))
    }
}

/// Always reports the same detection result.
pub struct FakeDetector {
    pub result: Detection,
    pub calls: AtomicUsize,
}

impl FakeDetector {
    pub fn new(code: Option<&str>) -> Self {
        Self {
            result: code.map_or(Detection::Unknown, |c| Detection::Language(c.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LanguageDetector for FakeDetector {
    fn detect(&self, _text: &str) -> Detection {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Blocks every translation until [`GatedEngine::release`] is called.
#[derive(Default)]
pub struct GatedEngine {
    open: Mutex<bool>,
    opened: Condvar,
    calls: AtomicUsize,
}

impl GatedEngine {
    pub fn release(&self) {
        *self.open.lock().unwrap() = true;
        self.opened.notify_all();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TranslationEngine for GatedEngine {
    fn translate(&self, pair: &LanguagePair, text: &str) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.opened.wait(open).unwrap();
        }
        Ok(format!("[{pair}] {text}"))
    }
}
