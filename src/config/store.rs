use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::model::{ChannelConfig, ChannelId, Config, GuildId, TargetUpdate};
use crate::fs::atomic_write;

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but does not hold a valid configuration.
    #[error("Config file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The storage medium rejected the write. The change was not applied.
    #[error("Failed to write config file {}: {source}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Durable guild/channel configuration.
///
/// The store is loaded once and kept in memory. Every mutation is written
/// through to disk before it returns, under a lock held for the whole
/// load-modify-save sequence.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Mutex<Config>,
}

impl ConfigStore {
    /// Opens the store at `path`, starting empty if the file is missing or corrupt.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = load(&path);
        Self {
            path,
            config: Mutex::new(config),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a copy of the current configuration.
    pub fn snapshot(&self) -> Config {
        self.lock().clone()
    }

    /// Returns the channel's settings, or the defaults if it has none.
    pub fn get_channel(&self, gid: GuildId, cid: ChannelId) -> ChannelConfig {
        self.lock().channel(gid, cid).cloned().unwrap_or_default()
    }

    /// Returns the guild's default target, if one is set.
    pub fn guild_default_target(&self, gid: GuildId) -> Option<String> {
        self.lock().guild(gid).and_then(|g| g.default_target.clone())
    }

    /// Updates the supplied channel fields and persists the result.
    ///
    /// Fields passed as `None` / [`TargetUpdate::Keep`] are left unchanged.
    pub fn set_channel(
        &self,
        gid: GuildId,
        cid: ChannelId,
        enabled: Option<bool>,
        target: TargetUpdate,
    ) -> Result<(), ConfigError> {
        self.mutate(|config| {
            let channel = config.channel_mut(gid, cid);
            if let Some(enabled) = enabled {
                channel.enabled = enabled;
            }
            match target {
                TargetUpdate::Keep => {}
                TargetUpdate::Set(code) => channel.target = Some(code),
                TargetUpdate::Clear => channel.target = None,
            }
        })
    }

    /// Sets the guild's default target and persists the result.
    pub fn set_guild_default_target(&self, gid: GuildId, target: &str) -> Result<(), ConfigError> {
        self.mutate(|config| {
            config.guilds.entry(gid).or_default().default_target = Some(target.to_string());
        })
    }

    /// Applies `change` and saves. If the save fails the in-memory state is
    /// restored, so memory never holds a state the disk rejected.
    fn mutate(&self, change: impl FnOnce(&mut Config)) -> Result<(), ConfigError> {
        let mut config = self.lock();
        let before = config.clone();
        change(&mut config);

        if *config == before {
            debug!("Config unchanged, skipping write");
            return Ok(());
        }

        if let Err(e) = save(&self.path, &config) {
            *config = before;
            return Err(e);
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Config> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reads the configuration at `path`.
///
/// A missing file yields an empty configuration. So does a corrupt one; the
/// corruption is logged and the file is left as is until the next save.
pub fn load(path: &Path) -> Config {
    match try_load(path) {
        Ok(Some(config)) => {
            info!(path = %path.display(), guilds = config.guilds.len(), "Loaded config");
            config
        }
        Ok(None) => {
            info!(path = %path.display(), "No config file, starting empty");
            Config::default()
        }
        Err(e) => {
            warn!("{e}; starting with an empty config");
            Config::default()
        }
    }
}

fn try_load(path: &Path) -> Result<Option<Config>, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| ConfigError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
}

/// Serializes `config` and atomically replaces the file at `path`.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let mut contents = serde_json::to_string_pretty(config)?;
    contents.push('\n');

    atomic_write(path, &contents).map_err(|source| ConfigError::StorageWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store(temp_dir: &TempDir) -> ConfigStore {
        ConfigStore::open(temp_dir.path().join("config.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();

        let config = load(&temp_dir.path().join("absent.json"));

        assert!(config.guilds.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{\"guilds\": {\"1\": ").unwrap();

        let config = load(&path);

        assert_eq!(config, Config::default());
        // The corrupt file is not overwritten by a load.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"guilds\": {\"1\": ");
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(load(&path).guilds.is_empty());
    }

    #[test]
    fn test_get_channel_defaults_without_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        let channel = store.get_channel(1, 2);

        assert!(!channel.enabled);
        assert!(channel.target.is_none());
        // Lookup never creates entries.
        assert!(store.snapshot().guilds.is_empty());
    }

    #[test]
    fn test_set_channel_partial_update() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store
            .set_channel(1, 2, Some(true), TargetUpdate::Set("es".to_string()))
            .unwrap();
        store.set_channel(1, 2, Some(false), TargetUpdate::Keep).unwrap();

        let channel = store.get_channel(1, 2);
        assert!(!channel.enabled);
        assert_eq!(channel.target.as_deref(), Some("es"));

        store.set_channel(1, 2, None, TargetUpdate::Clear).unwrap();
        let channel = store.get_channel(1, 2);
        assert!(!channel.enabled);
        assert!(channel.target.is_none());
    }

    #[test]
    fn test_set_channel_persists_across_reload() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store
            .set_channel(10, 20, Some(true), TargetUpdate::Set("ja".to_string()))
            .unwrap();
        store.set_guild_default_target(10, "de").unwrap();

        let reloaded = create_test_store(&temp_dir);

        assert_eq!(reloaded.snapshot(), store.snapshot());
        assert!(reloaded.get_channel(10, 20).enabled);
        assert_eq!(reloaded.guild_default_target(10).as_deref(), Some("de"));
    }

    #[test]
    fn test_repeated_identical_updates_are_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store.set_channel(1, 2, Some(true), TargetUpdate::Keep).unwrap();
        store.set_guild_default_target(1, "fr").unwrap();
        let first = fs::read_to_string(store.path()).unwrap();

        store.set_channel(1, 2, Some(true), TargetUpdate::Keep).unwrap();
        store.set_guild_default_target(1, "fr").unwrap();
        let second = fs::read_to_string(store.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(create_test_store(&temp_dir).snapshot(), store.snapshot());
    }

    #[test]
    fn test_saved_file_layout() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);

        store
            .set_channel(7, 8, Some(true), TargetUpdate::Set("pt".to_string()))
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["guilds"]["7"]["channels"]["8"]["enabled"], true);
        assert_eq!(raw["guilds"]["7"]["channels"]["8"]["target"], "pt");
    }

    #[test]
    fn test_failed_save_rolls_back_memory() {
        let temp_dir = TempDir::new().unwrap();
        // A directory at the config path makes the rename fail.
        let path = temp_dir.path().join("config.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
        let store = ConfigStore::open(&path);

        let result = store.set_channel(1, 2, Some(true), TargetUpdate::Keep);

        assert!(matches!(result, Err(ConfigError::StorageWrite { .. })));
        assert!(!store.get_channel(1, 2).enabled);
        assert!(store.snapshot().guilds.is_empty());
    }
}
