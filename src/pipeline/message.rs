use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{ChannelId, GuildId};
use crate::translation::{LanguagePair, TranslateError};

/// A chat message received from the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Platform message ID, used to thread the reply.
    pub id: u64,
    /// Guild the message was posted in; `None` for direct messages.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub author_id: u64,
    /// Display name used in the reply attribution.
    pub author_name: String,
    /// Whether the author is a bot, including this relay itself.
    #[serde(default)]
    pub author_is_bot: bool,
    #[serde(default)]
    pub content: String,
}

/// Why a message was not translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    FromBot,
    NoGuild,
    Disabled,
    EmptyBody,
    UnknownLanguage,
    AlreadyInTarget,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FromBot => "author is a bot",
            Self::NoGuild => "not in a guild",
            Self::Disabled => "translation disabled for channel",
            Self::EmptyBody => "empty message",
            Self::UnknownLanguage => "language not detected",
            Self::AlreadyInTarget => "already in target language",
        })
    }
}

/// A successful translation, ready to be posted as a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationReply {
    pub reply_to: u64,
    pub channel_id: ChannelId,
    /// `src` is the detected language, `dst` the target.
    pub pair: LanguagePair,
    pub translated: String,
    /// The original text, cut to the preview budget.
    pub original_preview: String,
    pub requested_by: String,
}

/// A failed translation, posted as a plain-text notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub reply_to: u64,
    pub channel_id: ChannelId,
    pub pair: LanguagePair,
    pub error: TranslateError,
}

/// The result of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing is posted.
    Skipped(SkipReason),
    Replied(TranslationReply),
    Failed(ErrorNotice),
}
