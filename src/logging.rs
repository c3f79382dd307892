//! Logger setup for the trainer binary.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects debug output, which
/// includes every arena event, and the default is one info line per
/// generation. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::from_env(Env::default().default_filter_or(level.to_string()))
        .format_timestamp_millis()
        .try_init();
}
