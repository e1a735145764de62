use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Opaque guild identifier (a platform snowflake).
pub type GuildId = u64;

/// Opaque channel identifier (a platform snowflake).
pub type ChannelId = u64;

/// The complete persisted configuration.
///
/// Serialized as `{"guilds": {"<gid>": {...}}}`. Guild and channel IDs are
/// written as JSON object keys, so they appear as strings on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Per-guild settings keyed by guild ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub guilds: BTreeMap<GuildId, GuildConfig>,
}

/// Settings for one guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildConfig {
    /// Target language for channels without their own override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target: Option<String>,
    /// Per-channel settings keyed by channel ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub channels: BTreeMap<ChannelId, ChannelConfig>,
}

/// Settings for one channel.
///
/// A channel with no entry behaves like `ChannelConfig::default()`:
/// translation disabled, no target override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Whether messages in this channel are translated.
    #[serde(default)]
    pub enabled: bool,
    /// Target language override for this channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// How a channel update treats the channel's target override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TargetUpdate {
    /// Leave the current override as is.
    #[default]
    Keep,
    /// Replace the override.
    Set(String),
    /// Remove the override so the guild default applies again.
    Clear,
}

impl Config {
    pub fn guild(&self, gid: GuildId) -> Option<&GuildConfig> {
        self.guilds.get(&gid)
    }

    pub fn channel(&self, gid: GuildId, cid: ChannelId) -> Option<&ChannelConfig> {
        self.guild(gid).and_then(|g| g.channels.get(&cid))
    }

    /// Returns the channel entry, creating the guild and channel on demand.
    pub fn channel_mut(&mut self, gid: GuildId, cid: ChannelId) -> &mut ChannelConfig {
        self.guilds
            .entry(gid)
            .or_default()
            .channels
            .entry(cid)
            .or_default()
    }
}

/// Returns `value` unless it is missing or blank.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_layout() {
        let json = r#"{
            "guilds": {
                "111": {
                    "default_target": "fr",
                    "channels": {
                        "222": {"enabled": true, "target": "es"},
                        "333": {"enabled": false}
                    }
                }
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.guild(111).unwrap().default_target.as_deref(), Some("fr"));
        assert_eq!(
            config.channel(111, 222),
            Some(&ChannelConfig {
                enabled: true,
                target: Some("es".to_string()),
            })
        );
        assert!(!config.channel(111, 333).unwrap().enabled);
        assert!(config.channel(111, 444).is_none());
    }

    #[test]
    fn test_null_and_missing_sections_default() {
        let config: Config =
            serde_json::from_str(r#"{"guilds": {"1": {"channels": null}}}"#).unwrap();
        assert!(config.guild(1).unwrap().channels.is_empty());

        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.guilds.is_empty());
    }

    #[test]
    fn test_serialize_omits_unset_targets() {
        let mut config = Config::default();
        config.channel_mut(5, 6).enabled = true;

        let json = serde_json::to_string(&config).unwrap();

        assert_eq!(json, r#"{"guilds":{"5":{"channels":{"6":{"enabled":true}}}}}"#);
    }

    #[test]
    fn test_non_empty_treats_blank_as_unset() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("de")), Some("de"));
        assert_eq!(non_empty(None), None);
    }
}
