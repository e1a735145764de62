//! The relay loop.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::thread;
use tokio::io::BufReader;
use tracing::info;

use crate::config::Settings;
use crate::relay;
use crate::services::Services;
use crate::translation::parse_pair_list;

/// Relays events between stdin and stdout until stdin closes.
///
/// Pairs in `preinstall` are installed on a background thread so the first
/// events are handled right away.
pub async fn run_relay(settings: &Settings, preinstall: &str) -> Result<()> {
    let services = Services::from_settings(settings);
    info!(
        config = %settings.config_path.display(),
        default_target = %settings.default_target,
        packages = %settings.packages_dir.display(),
        "Relay starting"
    );

    let pairs = parse_pair_list(preinstall);
    if !pairs.is_empty() {
        let cache = Arc::clone(&services.cache);
        thread::Builder::new()
            .name("preinstall".to_string())
            .spawn(move || {
                let results = cache.preinstall(&pairs);
                info!(pairs = results.len(), "Preinstall finished");
            })
            .context("Failed to start preinstall thread")?;
    }

    relay::run(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), &services).await?;
    info!("Input closed, relay stopped");
    Ok(())
}
