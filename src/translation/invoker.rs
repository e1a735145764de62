use std::sync::Arc;
use tracing::debug;

use super::{LanguagePair, ModelCache, TranslateError, TranslationEngine};

/// Runs translations, provisioning the model first.
pub struct Translator {
    cache: Arc<ModelCache>,
    engine: Arc<dyn TranslationEngine>,
}

impl Translator {
    pub fn new(cache: Arc<ModelCache>, engine: Arc<dyn TranslationEngine>) -> Self {
        Self { cache, engine }
    }

    /// Translates `text` along `pair`.
    ///
    /// Blocking: may download a model and always runs inference. The engine
    /// output is returned as is.
    pub fn translate(&self, pair: &LanguagePair, text: &str) -> Result<String, TranslateError> {
        if pair.is_identity() {
            return Ok(text.to_string());
        }

        self.cache.ensure(pair)?;
        debug!(%pair, chars = text.chars().count(), "Translating");
        self.engine.translate(pair, text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::ModelRegistry;
    use crate::translation::fakes::{FakeEngine, FakeRegistry};

    fn translator(registry: &Arc<FakeRegistry>, engine: &Arc<FakeEngine>) -> Translator {
        let cache = Arc::new(ModelCache::new(Arc::clone(registry) as Arc<dyn ModelRegistry>));
        Translator::new(cache, Arc::clone(engine) as Arc<dyn TranslationEngine>)
    }

    #[test]
    fn test_translate_provisions_then_delegates() {
        let registry = Arc::new(FakeRegistry::with_available(&[("es", "en")]));
        let engine = Arc::new(FakeEngine::default());
        let translator = translator(&registry, &engine);

        let out = translator
            .translate(&LanguagePair::new("es", "en"), "hola")
            .unwrap();

        assert_eq!(out, "[es→en] HOLA");
        assert_eq!(registry.installs(), 1);
        assert_eq!(engine.calls(), 1);
    }

    #[test]
    fn test_translate_propagates_model_unavailable() {
        let registry = Arc::new(FakeRegistry::default());
        let engine = Arc::new(FakeEngine::default());
        let translator = translator(&registry, &engine);
        let pair = LanguagePair::new("eo", "ko");

        let err = translator.translate(&pair, "saluton").unwrap_err();

        assert_eq!(err, TranslateError::ModelUnavailable { pair });
        assert_eq!(engine.calls(), 0);
    }

    #[test]
    fn test_translate_surfaces_engine_failure() {
        let registry = Arc::new(FakeRegistry::default());
        registry.install_now("fr", "en");
        let engine = Arc::new(FakeEngine {
            fail_with: Some("ctranslate2 crashed".to_string()),
            ..FakeEngine::default()
        });
        let translator = translator(&registry, &engine);

        let err = translator
            .translate(&LanguagePair::new("fr", "en"), "bonjour")
            .unwrap_err();

        assert_eq!(err.to_string(), "ctranslate2 crashed");
        assert_eq!(registry.refreshes(), 0);
    }

    #[test]
    fn test_translate_identity_returns_text() {
        let registry = Arc::new(FakeRegistry::default());
        let engine = Arc::new(FakeEngine::default());
        let translator = translator(&registry, &engine);

        let out = translator
            .translate(&LanguagePair::new("en", "en"), "hello")
            .unwrap();

        assert_eq!(out, "hello");
        assert_eq!(engine.calls(), 0);
    }
}
