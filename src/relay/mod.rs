//! Bridge between the chat platform and the translation pipeline.
//!
//! The platform side (gateway connection, slash-command registration,
//! permission checks) lives in a separate bridge process that exchanges
//! one JSON object per line with `tl-relay run`.

mod host;
mod protocol;

pub use host::run;
pub use protocol::{AllowedMentions, CommandEvent, InboundEvent, OutboundEvent};
