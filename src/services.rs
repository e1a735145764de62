//! Construction of the shared service graph.

use std::sync::Arc;

use crate::argos::{ArgosCliEngine, ArgosRegistry};
use crate::config::{ConfigStore, Settings};
use crate::control::Controller;
use crate::detect::WhatlangDetector;
use crate::pipeline::Pipeline;
use crate::resolver::LanguageResolver;
use crate::translation::{LanguageDetector, ModelCache, ModelRegistry, TranslationEngine, Translator};

/// Everything a running relay shares between messages and commands.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<ConfigStore>,
    pub cache: Arc<ModelCache>,
    pub pipeline: Arc<Pipeline>,
    pub controller: Arc<Controller>,
}

impl Services {
    /// Wires the Argos registry and engine with the whatlang detector.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings,
            Arc::new(ArgosRegistry::from_settings(settings)),
            Arc::new(ArgosCliEngine::from_settings(settings)),
            Arc::new(WhatlangDetector),
        )
    }

    pub fn new(
        settings: &Settings,
        registry: Arc<dyn ModelRegistry>,
        engine: Arc<dyn TranslationEngine>,
        detector: Arc<dyn LanguageDetector>,
    ) -> Self {
        let store = Arc::new(ConfigStore::open(&settings.config_path));
        let resolver = LanguageResolver::new(Arc::clone(&store), settings.default_target.clone());
        let cache = Arc::new(ModelCache::new(registry));
        let translator = Arc::new(Translator::new(Arc::clone(&cache), engine));

        Self {
            pipeline: Arc::new(Pipeline::new(resolver.clone(), detector, translator)),
            controller: Arc::new(Controller::new(resolver, Arc::clone(&cache))),
            store,
            cache,
        }
    }
}
