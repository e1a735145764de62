use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    ChannelId, DEFAULT_ARGOS_BIN, DEFAULT_CONFIG_PATH, DEFAULT_PACKAGE_INDEX, DEFAULT_TARGET_LANG,
    GuildId, Settings,
};
use crate::paths;

#[derive(Parser, Debug)]
#[command(name = "tl-relay")]
#[command(about = "Offline auto-translation relay for chat channels")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(ClapArgs, Debug)]
pub struct GlobalArgs {
    /// Guild/channel configuration file
    #[arg(long = "config", global = true, env = "CONFIG_PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: PathBuf,

    /// Target language when neither channel nor guild sets one (ISO 639-1)
    #[arg(long, global = true, env = "DEFAULT_TARGET_LANG", default_value = DEFAULT_TARGET_LANG)]
    pub default_target: String,

    /// Directory holding installed Argos Translate packages
    #[arg(long, global = true, env = "ARGOS_PACKAGES_DIR")]
    pub packages_dir: Option<PathBuf>,

    /// URL of the Argos Translate package index
    #[arg(long, global = true, env = "ARGOS_PACKAGE_INDEX", default_value = DEFAULT_PACKAGE_INDEX)]
    pub index_url: String,

    /// Argos Translate executable
    #[arg(long, global = true, env = "ARGOS_TRANSLATE_BIN", default_value = DEFAULT_ARGOS_BIN)]
    pub argos_bin: String,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

impl GlobalArgs {
    pub fn settings(&self) -> Settings {
        Settings {
            config_path: self.config_path.clone(),
            default_target: self.default_target.clone(),
            packages_dir: self
                .packages_dir
                .clone()
                .unwrap_or_else(paths::packages_dir),
            index_url: self.index_url.clone(),
            index_cache: paths::cache_dir().join("index.json"),
            argos_bin: self.argos_bin.clone(),
        }
    }
}

/// Identifies one channel of one guild.
#[derive(ClapArgs, Debug, Clone, Copy)]
pub struct ChannelRef {
    /// Guild (server) ID
    #[arg(long)]
    pub guild: GuildId,

    /// Channel ID
    #[arg(long)]
    pub channel: ChannelId,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Relay JSON-lines events between stdin and stdout
    Run {
        /// Language pairs to install in the background, e.g. "es->en,en->es"
        #[arg(long, env = "ARGOS_PREINSTALL", default_value = "")]
        preinstall: String,
    },
    /// Enable auto-translation in a channel
    Enable {
        #[command(flatten)]
        channel: ChannelRef,

        /// Channel target language code (ISO 639-1, e.g., ja, en, zh)
        #[arg(short = 't', long = "to")]
        to: Option<String>,
    },
    /// Disable auto-translation in a channel
    Disable {
        #[command(flatten)]
        channel: ChannelRef,
    },
    /// Set a guild's default target language
    SetTarget {
        /// Guild (server) ID
        #[arg(long)]
        guild: GuildId,

        /// Target language code (ISO 639-1)
        target: String,
    },
    /// Remove a channel's target so the guild default applies
    ClearTarget {
        #[command(flatten)]
        channel: ChannelRef,
    },
    /// Show a channel's translation settings
    Status {
        #[command(flatten)]
        channel: ChannelRef,
    },
    /// List installed language codes
    Langs,
    /// Install translation models ahead of time
    Preinstall {
        /// Comma-separated pairs, e.g. "es->en,en->es"
        #[arg(env = "ARGOS_PREINSTALL")]
        pairs: String,
    },
}
