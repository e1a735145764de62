//! # tl-relay - Chat Auto-Translation Relay
//!
//! `tl-relay` watches chat channels that a guild administrator has enabled
//! and replies to each message with a translation into the channel's target
//! language. Translation runs offline through Argos Translate; language
//! models are downloaded and installed the first time a pair is needed.
//!
//! ## Features
//!
//! - **Per-channel targets**: channel override, then guild default, then the process default
//! - **On-demand models**: a missing pair is fetched from the package index exactly once
//! - **Offline detection**: the source language is detected locally
//! - **Line protocol**: a platform bridge talks to `tl-relay run` over JSON lines
//!
//! ## Quick Start
//!
//! ```bash
//! # Enable a channel, translating into Japanese
//! tl-relay enable --guild 1 --channel 2 --to ja
//!
//! # Install models ahead of time
//! tl-relay preinstall es->en,en->es
//!
//! # Relay events from a bridge process
//! bridge | tl-relay run | bridge-sink
//! ```
//!
//! ## Configuration
//!
//! Channel settings are stored as JSON (default `./config.json`):
//!
//! ```json
//! {
//!   "guilds": {
//!     "1": {
//!       "default_target": "de",
//!       "channels": { "2": { "enabled": true, "target": "ja" } }
//!     }
//!   }
//! }
//! ```

/// Argos Translate package registry and command-line engine.
pub mod argos;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Guild/channel configuration store and process settings.
pub mod config;

/// Administrator commands.
pub mod control;

/// Offline language detection.
pub mod detect;

/// File system utilities.
pub mod fs;

/// Tracing subscriber setup.
pub mod logging;

/// XDG-style path utilities for packages and cache.
pub mod paths;

/// Per-message translation pipeline.
pub mod pipeline;

/// JSON-lines relay between the chat platform and the pipeline.
pub mod relay;

/// Target language resolution.
pub mod resolver;

/// Shared service wiring.
pub mod services;

/// Language pairs, model provisioning and translation.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
