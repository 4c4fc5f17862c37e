//! Tracing subscriber setup.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global fmt subscriber.
///
/// Debug builds log at DEBUG, release builds at INFO. Safe to call more than
/// once: later calls leave the first subscriber in place.
pub fn init() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
