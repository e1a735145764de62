//! Effective target language and enablement per channel.

use std::sync::Arc;

use crate::config::{ChannelId, ConfigStore, DEFAULT_TARGET_LANG, GuildId, non_empty};

/// Resolves per-channel settings against guild and process defaults.
#[derive(Debug, Clone)]
pub struct LanguageResolver {
    store: Arc<ConfigStore>,
    default_target: String,
}

impl LanguageResolver {
    /// Creates a resolver. A blank `default_target` falls back to English.
    pub fn new(store: Arc<ConfigStore>, default_target: impl Into<String>) -> Self {
        let default_target = default_target.into().trim().to_string();
        let default_target = if default_target.is_empty() {
            DEFAULT_TARGET_LANG.to_string()
        } else {
            default_target
        };
        Self {
            store,
            default_target,
        }
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Returns the target language for messages in `(gid, cid)`.
    ///
    /// Channel override first, then the guild default, then the process default.
    pub fn resolve_target(&self, gid: GuildId, cid: ChannelId) -> String {
        let channel = self.store.get_channel(gid, cid);
        if let Some(target) = non_empty(channel.target.as_deref()) {
            return target.to_string();
        }

        let guild_default = self.store.guild_default_target(gid);
        non_empty(guild_default.as_deref())
            .unwrap_or(&self.default_target)
            .to_string()
    }

    pub fn is_enabled(&self, gid: GuildId, cid: ChannelId) -> bool {
        self.store.get_channel(gid, cid).enabled
    }
}
