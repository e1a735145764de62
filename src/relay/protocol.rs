//! Line-delimited JSON events exchanged with the chat platform bridge.

use serde::{Deserialize, Serialize};

use crate::config::{ChannelId, GuildId};
use crate::control::ControlCommand;
use crate::pipeline::{InboundMessage, Outcome};

/// One line read from the platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    Message(InboundMessage),
    Command(CommandEvent),
}

/// An authorized slash command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandEvent {
    /// Interaction ID the result answers.
    pub id: u64,
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub command: ControlCommand,
}

/// Which mentions the platform may notify for a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedMentions {
    None,
}

/// One line written to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundEvent {
    Translation {
        reply_to: u64,
        channel_id: ChannelId,
        detected: String,
        target: String,
        translated: String,
        original: String,
        requested_by: String,
        mention_author: bool,
        allowed_mentions: AllowedMentions,
    },
    Error {
        reply_to: u64,
        channel_id: ChannelId,
        content: String,
        allowed_mentions: AllowedMentions,
    },
    CommandResult {
        reply_to: u64,
        ok: bool,
        content: String,
        ephemeral: bool,
    },
}

impl OutboundEvent {
    /// Converts a pipeline outcome into the line to post, if any.
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Skipped(_) => None,
            Outcome::Replied(reply) => Some(Self::Translation {
                reply_to: reply.reply_to,
                channel_id: reply.channel_id,
                detected: reply.pair.src,
                target: reply.pair.dst,
                translated: reply.translated,
                original: reply.original_preview,
                requested_by: reply.requested_by,
                mention_author: false,
                allowed_mentions: AllowedMentions::None,
            }),
            Outcome::Failed(notice) => Some(Self::Error {
                reply_to: notice.reply_to,
                channel_id: notice.channel_id,
                content: notice.text(),
                allowed_mentions: AllowedMentions::None,
            }),
        }
    }

    pub const fn command_result(reply_to: u64, ok: bool, content: String) -> Self {
        Self::CommandResult {
            reply_to,
            ok,
            content,
            ephemeral: true,
        }
    }
}
