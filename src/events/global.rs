//! Global access to the application event bus.
//!
//! Objective-C action methods (button taps, sensor setup) have no Rust
//! context to carry a publisher through, so the bus is also reachable
//! statically. Initialize once at startup via `init_event_bus()`.
//!
//! - `Sender` is stored in `OnceLock` - it's `Send + Sync`
//! - `Receiver` is stored in `Mutex` - only drained from the physics tick

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, OnceLock};

use tracing::warn;

use super::types::AppEvent;

static SENDER: OnceLock<Sender<AppEvent>> = OnceLock::new();

static RECEIVER: OnceLock<Mutex<Receiver<AppEvent>>> = OnceLock::new();

/// Initialize the global event bus.
///
/// Returns `false` (and leaves the existing bus alone) if it was already
/// initialized.
pub fn init_event_bus() -> bool {
    let (sender, receiver) = mpsc::channel();

    if SENDER.set(sender).is_err() {
        return false;
    }
    RECEIVER.set(Mutex::new(receiver)).is_ok()
}

/// Publish an event to the global event bus.
///
/// Events published before initialization are dropped with a warning.
pub fn publish(event: AppEvent) {
    match SENDER.get() {
        Some(sender) => {
            let _ = sender.send(event);
        }
        None => warn!("Event bus not initialized; dropping {:?}", event),
    }
}

/// Drain all pending events from the global event bus.
///
/// Returns an empty Vec if the bus is not initialized.
pub fn drain_events() -> Vec<AppEvent> {
    let Some(receiver) = RECEIVER.get() else {
        return Vec::new();
    };

    let receiver = match receiver.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}
