//! Configuration commands issued by guild administrators.
//!
//! Permission checks belong to the chat platform; by the time a command
//! reaches [`Controller::execute`] it is authorized.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::{ChannelId, ConfigError, GuildId, TargetUpdate};
use crate::resolver::LanguageResolver;
use crate::translation::{COMMON_LANGUAGES, ModelCache, TranslateError};

/// A command from the platform's command surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ControlCommand {
    /// Turn translation on for the channel, optionally setting its target.
    Enable {
        #[serde(default)]
        target: Option<String>,
    },
    Disable,
    /// Set the guild's default target language.
    SetTarget { target: String },
    /// Remove the channel's own target so the guild default applies.
    ClearTarget,
    Status,
    /// List installed language codes.
    Langs,
}

#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] TranslateError),

    #[error("Target language must not be empty")]
    EmptyTarget,
}

/// What a command changed or reports, rendered for the user by `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    Enabled { channel: ChannelId, target: String },
    Disabled { channel: ChannelId },
    GuildTargetSet { target: String },
    ChannelTargetCleared { channel: ChannelId, target: String },
    Status {
        channel: ChannelId,
        enabled: bool,
        target: String,
    },
    Languages { installed: Vec<String> },
}

impl fmt::Display for CommandReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled { channel, target } => {
                write!(f, "Enabled auto-translation in <#{channel}> → `{target}`")
            }
            Self::Disabled { channel } => write!(f, "Disabled auto-translation in <#{channel}>."),
            Self::GuildTargetSet { target } => {
                write!(f, "Default target language set to `{target}` for this server.")
            }
            Self::ChannelTargetCleared { channel, target } => {
                write!(f, "Cleared the target override in <#{channel}>, now `{target}`.")
            }
            Self::Status {
                channel,
                enabled,
                target,
            } => write!(
                f,
                "**Channel:** <#{channel}>\n**Enabled:** {enabled}\n**Target:** `{target}`"
            ),
            Self::Languages { installed } => {
                let installed = if installed.is_empty() {
                    "none".to_string()
                } else {
                    installed.join(", ")
                };
                let common: Vec<String> = COMMON_LANGUAGES.iter().map(|c| format!("`{c}`")).collect();
                write!(
                    f,
                    "Installed: {installed}\nCommon ISO 639-1 codes: {}",
                    common.join(", ")
                )
            }
        }
    }
}

/// Executes [`ControlCommand`]s against the config store and model cache.
pub struct Controller {
    resolver: LanguageResolver,
    cache: Arc<ModelCache>,
}

impl Controller {
    pub const fn new(resolver: LanguageResolver, cache: Arc<ModelCache>) -> Self {
        Self { resolver, cache }
    }

    /// Runs `command` for channel `cid` of guild `gid`.
    ///
    /// Mutating commands are persisted before this returns; a failed write
    /// is reported as an error and leaves the configuration unchanged.
    pub fn execute(
        &self,
        gid: GuildId,
        cid: ChannelId,
        command: ControlCommand,
    ) -> Result<CommandReply, ControlError> {
        let store = self.resolver.store();

        let reply = match command {
            ControlCommand::Enable { target } => {
                let target = match target.as_deref().map(str::trim) {
                    Some(code) if !code.is_empty() => TargetUpdate::Set(code.to_string()),
                    _ => TargetUpdate::Keep,
                };
                store.set_channel(gid, cid, Some(true), target)?;
                CommandReply::Enabled {
                    channel: cid,
                    target: self.resolver.resolve_target(gid, cid),
                }
            }
            ControlCommand::Disable => {
                store.set_channel(gid, cid, Some(false), TargetUpdate::Keep)?;
                CommandReply::Disabled { channel: cid }
            }
            ControlCommand::SetTarget { target } => return self.set_guild_target(gid, &target),
            ControlCommand::ClearTarget => {
                store.set_channel(gid, cid, None, TargetUpdate::Clear)?;
                CommandReply::ChannelTargetCleared {
                    channel: cid,
                    target: self.resolver.resolve_target(gid, cid),
                }
            }
            ControlCommand::Status => CommandReply::Status {
                channel: cid,
                enabled: self.resolver.is_enabled(gid, cid),
                target: self.resolver.resolve_target(gid, cid),
            },
            ControlCommand::Langs => CommandReply::Languages {
                installed: self.cache.installed_languages()?,
            },
        };

        info!(guild = gid, channel = cid, ?reply, "Executed command");
        Ok(reply)
    }

    /// Sets the target used by every channel of `gid` without its own.
    pub fn set_guild_target(&self, gid: GuildId, target: &str) -> Result<CommandReply, ControlError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ControlError::EmptyTarget);
        }
        self.resolver.store().set_guild_default_target(gid, target)?;
        info!(guild = gid, target, "Set guild default target");
        Ok(CommandReply::GuildTargetSet {
            target: target.to_string(),
        })
    }
}
