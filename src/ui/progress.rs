use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Counts finished items on stderr, e.g. models during `preinstall`.
///
/// Clears itself when dropped.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    #[allow(clippy::unwrap_used)]
    pub fn new(message: &str, total: u64) -> Self {
        let bar = ProgressBar::new(total);
        // unwrap is safe: template string is a compile-time constant
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner} {prefix} [{pos}/{len}] {msg} {elapsed:.dim}")
                .unwrap(),
        );
        bar.set_prefix(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Returns a callback that marks one item done, showing `label` as the last one.
    ///
    /// The callback can be moved to the thread doing the work.
    pub fn tracker(&self) -> impl Fn(&str) + Send + 'static {
        let bar = self.bar.clone();
        move |label| {
            bar.set_message(label.to_string());
            bar.inc(1);
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_counts_items() {
        let progress = Progress::new("Installing", 2);
        let done = progress.tracker();

        done("es→en");
        done("en→es");

        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.message(), "en→es");
    }
}
