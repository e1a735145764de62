use std::sync::Arc;
use tokio::task;
use tracing::{debug, error, info, instrument, warn};

use super::format::preview;
use super::{ErrorNotice, InboundMessage, Outcome, SkipReason, TranslationReply};
use crate::config::GuildId;
use crate::resolver::LanguageResolver;
use crate::translation::{
    Detection, LanguageDetector, LanguagePair, TranslateError, Translator,
};

/// Turns inbound messages into replies.
///
/// Each call to [`Pipeline::handle`] runs one message through filter,
/// detect, resolve and translate, and returns what should be posted.
pub struct Pipeline {
    resolver: LanguageResolver,
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<Translator>,
}

impl Pipeline {
    pub fn new(
        resolver: LanguageResolver,
        detector: Arc<dyn LanguageDetector>,
        translator: Arc<Translator>,
    ) -> Self {
        Self {
            resolver,
            detector,
            translator,
        }
    }

    #[instrument(skip_all, fields(message_id = msg.id, channel_id = msg.channel_id))]
    pub async fn handle(&self, msg: &InboundMessage) -> Outcome {
        let (gid, text) = match self.admit(msg) {
            Ok(admitted) => admitted,
            Err(reason) => return skipped(reason),
        };

        let Detection::Language(src) = self.detect(text).await else {
            return skipped(SkipReason::UnknownLanguage);
        };

        let dst = self.resolver.resolve_target(gid, msg.channel_id);
        let pair = LanguagePair::new(src, dst);
        if pair.is_identity() {
            return skipped(SkipReason::AlreadyInTarget);
        }

        match self.translate(&pair, text).await {
            Ok(translated) => {
                info!(%pair, "Translated message");
                Outcome::Replied(TranslationReply {
                    reply_to: msg.id,
                    channel_id: msg.channel_id,
                    pair,
                    translated,
                    original_preview: preview(text),
                    requested_by: msg.author_name.clone(),
                })
            }
            Err(error) => {
                warn!(%pair, "Translation failed: {error}");
                Outcome::Failed(ErrorNotice {
                    reply_to: msg.id,
                    channel_id: msg.channel_id,
                    pair,
                    error,
                })
            }
        }
    }

    /// Applies the cheap filters, returning the guild and the trimmed body.
    fn admit<'m>(&self, msg: &'m InboundMessage) -> Result<(GuildId, &'m str), SkipReason> {
        if msg.author_is_bot {
            return Err(SkipReason::FromBot);
        }
        let gid = msg.guild_id.ok_or(SkipReason::NoGuild)?;
        if !self.resolver.is_enabled(gid, msg.channel_id) {
            return Err(SkipReason::Disabled);
        }

        let text = msg.content.trim();
        if text.is_empty() {
            return Err(SkipReason::EmptyBody);
        }
        Ok((gid, text))
    }

    async fn detect(&self, text: &str) -> Detection {
        let detector = Arc::clone(&self.detector);
        let text = text.to_string();

        match task::spawn_blocking(move || detector.detect(&text)).await {
            Ok(detection) => detection,
            Err(e) => {
                error!("Language detection task failed: {e}");
                Detection::Unknown
            }
        }
    }

    async fn translate(&self, pair: &LanguagePair, text: &str) -> Result<String, TranslateError> {
        let translator = Arc::clone(&self.translator);
        let pair = pair.clone();
        let text = text.to_string();

        task::spawn_blocking(move || translator.translate(&pair, &text))
            .await
            .map_err(|e| TranslateError::engine(format!("translation task failed: {e}")))?
    }
}

fn skipped(reason: SkipReason) -> Outcome {
    debug!(%reason, "Skipping message");
    Outcome::Skipped(reason)
}
