use std::io;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info";
const VERBOSE_FILTER: &str = "tl_relay=debug,info";

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `verbose` when set. Calling this twice is a no-op.
pub fn init(verbose: bool, json: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let fmt = layer().with_writer(io::stderr).with_target(false);
    let fmt = if json {
        fmt.json().boxed()
    } else {
        fmt.compact().boxed()
    };

    let _ = tracing_subscriber::registry().with(filter).with(fmt).try_init();
}
