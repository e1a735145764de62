//! Subcommand implementations.

/// Channel and guild configuration commands.
pub mod channel;

/// Installed language listing.
pub mod langs;

/// Ahead-of-time model installation.
pub mod preinstall;

/// The relay loop.
pub mod run;
