//! Configuration commands run from the shell instead of the chat platform.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::argos::ArgosRegistry;
use crate::config::{ChannelId, ConfigStore, GuildId, Settings};
use crate::control::{CommandReply, ControlCommand, Controller};
use crate::resolver::LanguageResolver;
use crate::translation::ModelCache;
use crate::ui::Style;

fn controller(settings: &Settings) -> Controller {
    let store = Arc::new(ConfigStore::open(&settings.config_path));
    let resolver = LanguageResolver::new(store, settings.default_target.clone());
    let cache = Arc::new(ModelCache::new(Arc::new(ArgosRegistry::from_settings(settings))));
    Controller::new(resolver, cache)
}

/// Executes `command` for one channel and prints the result.
pub fn run_channel_command(
    settings: &Settings,
    gid: GuildId,
    cid: ChannelId,
    command: ControlCommand,
) -> Result<()> {
    let reply = controller(settings)
        .execute(gid, cid, command)
        .with_context(|| format!("Failed to update {}", settings.config_path.display()))?;
    println!("{}", render(gid, &reply));
    Ok(())
}

/// Sets a guild's default target and prints the result.
pub fn run_guild_target(settings: &Settings, gid: GuildId, target: &str) -> Result<()> {
    let reply = controller(settings)
        .set_guild_target(gid, target)
        .with_context(|| format!("Failed to update {}", settings.config_path.display()))?;
    println!("{}", render(gid, &reply));
    Ok(())
}

fn render(gid: GuildId, reply: &CommandReply) -> String {
    match reply {
        CommandReply::Enabled { channel, target } => format!(
            "{} auto-translation in channel {} → {}",
            Style::success("Enabled"),
            Style::value(channel),
            Style::code(target)
        ),
        CommandReply::Disabled { channel } => format!(
            "{} auto-translation in channel {}",
            Style::warning("Disabled"),
            Style::value(channel)
        ),
        CommandReply::GuildTargetSet { target } => format!(
            "Default target for guild {} set to {}",
            Style::value(gid),
            Style::code(target)
        ),
        CommandReply::ChannelTargetCleared { channel, target } => format!(
            "Cleared the target of channel {}, now {}",
            Style::value(channel),
            Style::code(target)
        ),
        CommandReply::Status {
            channel,
            enabled,
            target,
        } => format!(
            "{}\n  {}  {}\n  {}   {}",
            Style::header(format!("Channel {channel} (guild {gid})")),
            Style::label("enabled"),
            Style::value(enabled),
            Style::label("target"),
            Style::code(target)
        ),
        // Produced by the `langs` subcommand, which has its own output.
        CommandReply::Languages { .. } => reply.to_string(),
    }
}
