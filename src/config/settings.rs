use std::path::PathBuf;

use crate::paths;

/// Default target language when neither channel nor guild sets one.
pub const DEFAULT_TARGET_LANG: &str = "en";

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Public Argos Translate package index.
pub const DEFAULT_PACKAGE_INDEX: &str =
    "https://raw.githubusercontent.com/argosopentech/argospm-index/main/index.json";

/// Default name of the Argos Translate command-line executable.
pub const DEFAULT_ARGOS_BIN: &str = "argos-translate";

/// Process-wide settings resolved from CLI flags and environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path of the guild/channel configuration file.
    pub config_path: PathBuf,
    /// Target language used when no guild or channel override exists.
    pub default_target: String,
    /// Directory holding installed Argos packages.
    pub packages_dir: PathBuf,
    /// URL of the remote package index.
    pub index_url: String,
    /// Local copy of the last fetched package index.
    pub index_cache: PathBuf,
    /// Executable used to run translations.
    pub argos_bin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            default_target: DEFAULT_TARGET_LANG.to_string(),
            packages_dir: paths::packages_dir(),
            index_url: DEFAULT_PACKAGE_INDEX.to_string(),
            index_cache: paths::cache_dir().join("index.json"),
            argos_bin: DEFAULT_ARGOS_BIN.to_string(),
        }
    }
}
