//! Per-message translation pipeline.

mod format;
mod message;
mod orchestrator;

pub use format::{PREVIEW_LIMIT, preview};
pub use message::{ErrorNotice, InboundMessage, Outcome, SkipReason, TranslationReply};
pub use orchestrator::Pipeline;
