//! Argos Translate backed model registry and translation engine.

mod engine;
mod index;
mod registry;

pub use engine::ArgosCliEngine;
pub use index::{PackageEntry, PackageMetadata, fetch_index, parse_index};
pub use registry::ArgosRegistry;
