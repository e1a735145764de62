//! Terminal output helpers for the administrative subcommands.

mod progress;
mod style;

pub use progress::Progress;
pub use style::Style;
