//! XDG-style path utilities for model packages and cache directories.
//!
//! Argos Translate keeps its packages under the XDG data directory; the
//! relay follows the same layout so packages installed by either tool are
//! visible to the other.

use std::path::PathBuf;

/// Returns the directory holding installed Argos packages.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/argos-translate/packages` if `XDG_DATA_HOME` is set
/// 2. `~/.local/share/argos-translate/packages` otherwise
pub fn packages_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME").map_or_else(
        |_| {
            home_dir()
                .join(".local")
                .join("share")
                .join("argos-translate")
                .join("packages")
        },
        |xdg| PathBuf::from(xdg).join("argos-translate").join("packages"),
    )
}

/// Returns the cache directory for tl-relay.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/tl-relay` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/tl-relay` otherwise
pub fn cache_dir() -> PathBuf {
    std::env::var("XDG_CACHE_HOME").map_or_else(
        |_| home_dir().join(".cache").join("tl-relay"),
        |xdg| PathBuf::from(xdg).join("tl-relay"),
    )
}

/// Returns the user's home directory, or the working directory if unknown.
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
