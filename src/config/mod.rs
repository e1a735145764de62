mod model;
mod settings;
mod store;

pub use model::{ChannelConfig, ChannelId, Config, GuildConfig, GuildId, TargetUpdate};
pub(crate) use model::non_empty;
pub use settings::{
    DEFAULT_ARGOS_BIN, DEFAULT_CONFIG_PATH, DEFAULT_PACKAGE_INDEX, DEFAULT_TARGET_LANG, Settings,
};
pub use store::{ConfigError, ConfigStore, load, save};
