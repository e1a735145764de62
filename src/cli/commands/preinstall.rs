//! Ahead-of-time model installation.

use anyhow::{Context, Result, bail};
use std::sync::Arc;

use crate::argos::ArgosRegistry;
use crate::config::Settings;
use crate::translation::{LanguagePair, ModelCache, PreinstallStatus, parse_pair_list};
use crate::ui::{Progress, Style};

/// Installs every pair in `pairs` and prints one line per pair.
///
/// Fails if any pair could not be installed, after attempting all of them.
pub async fn run_preinstall(settings: &Settings, pairs: &str) -> Result<()> {
    let pairs = parse_pair_list(pairs);
    if pairs.is_empty() {
        bail!(
            "Error: No language pairs given\n\n\
             Pass them as a comma-separated list, e.g. 'tl-relay preinstall es->en,en->es'"
        );
    }

    let cache = Arc::new(ModelCache::new(Arc::new(ArgosRegistry::from_settings(
        settings,
    ))));

    let progress = Progress::new("Installing models", pairs.len() as u64);
    let done = progress.tracker();
    let results = tokio::task::spawn_blocking(move || {
        cache.preinstall_each(&pairs, |pair, _| done(&pair.to_string()))
    })
    .await
    .context("Preinstall task failed")?;
    progress.finish();

    for (pair, status) in &results {
        println!("{}", render(pair, status));
    }

    let failed = results
        .iter()
        .filter(|(_, status)| !is_success(status))
        .count();
    if failed > 0 {
        bail!("{failed} of {} pair(s) could not be installed", results.len());
    }
    Ok(())
}

const fn is_success(status: &PreinstallStatus) -> bool {
    matches!(
        status,
        PreinstallStatus::Installed | PreinstallStatus::AlreadyInstalled
    )
}

fn render(pair: &LanguagePair, status: &PreinstallStatus) -> String {
    let status = match status {
        PreinstallStatus::Installed => Style::success("installed"),
        PreinstallStatus::AlreadyInstalled => Style::secondary("already installed"),
        PreinstallStatus::Unavailable => Style::warning("no package in the index"),
        PreinstallStatus::Failed(reason) => format!("{} {reason}", Style::error("failed:")),
    };
    format!("  {:10} {status}", Style::code(pair))
}
