mod engine;
mod error;
#[cfg(test)]
pub(crate) mod fakes;
mod invoker;
mod language;
mod provision;

pub use engine::{LanguageDetector, ModelRegistry, TranslationEngine};
pub use error::TranslateError;
pub use invoker::Translator;
pub use language::{COMMON_LANGUAGES, Detection, LanguagePair, ParsePairError, parse_pair_list};
pub use provision::{ModelCache, PreinstallStatus};
