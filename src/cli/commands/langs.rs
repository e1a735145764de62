//! Installed language listing.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::argos::ArgosRegistry;
use crate::config::Settings;
use crate::translation::{COMMON_LANGUAGES, ModelCache};
use crate::ui::Style;

/// Prints the language codes of installed models, then the common codes.
pub fn print_languages(settings: &Settings) -> Result<()> {
    let registry = ArgosRegistry::from_settings(settings);
    let packages_dir = registry.packages_dir().display().to_string();
    let cache = ModelCache::new(Arc::new(registry));

    let installed = cache
        .installed_languages()
        .with_context(|| format!("Failed to scan {packages_dir}"))?;

    println!(
        "{} {}",
        Style::header("Installed languages"),
        Style::secondary(format!("({packages_dir})"))
    );
    if installed.is_empty() {
        println!("  {}", Style::secondary("none"));
    }
    for code in &installed {
        println!("  {}", Style::code(code));
    }

    println!();
    println!("{}", Style::header("Common ISO 639-1 codes"));
    let common: Vec<String> = COMMON_LANGUAGES.iter().map(Style::code).collect();
    println!("  {}", common.join(", "));

    Ok(())
}
