//! Thread-safe event bus using mpsc channels.
//!
//! UI callbacks run on the main thread while SceneKit's physics callback runs
//! on its render thread; the bus carries discrete actions from the former to
//! the latter:
//! - Any thread can publish events via `EventPublisher::publish()`
//! - The physics tick polls for events via `EventBus::drain()`

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::types::AppEvent;

/// Multi-producer, single-consumer event queue.
///
/// # Example
///
/// ```
/// use ar_vehicle::events::{EventBus, AppEvent};
///
/// let bus = EventBus::new();
/// let publisher = bus.publisher();
///
/// publisher.publish(AppEvent::SpawnVehicle);
///
/// let events = bus.drain();
/// assert_eq!(events.len(), 1);
/// ```
pub struct EventBus {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
}

impl EventBus {
    /// Create a new event bus.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Get a publisher handle that can be cloned and sent to other threads.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Try to receive the next event without blocking.
    pub fn try_recv(&self) -> Option<AppEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            // The bus keeps its own sender, so Disconnected cannot happen
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending events into a Vec, in publish order.
    pub fn drain(&self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable, thread-safe event publisher.
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<AppEvent>,
}

impl EventPublisher {
    /// Publish an event to the bus.
    ///
    /// Non-blocking. If the receiver has been dropped (app shutting down),
    /// the send silently fails.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_bus() {
        let bus = EventBus::new();
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_publish_and_receive_multiple_events() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        publisher.publish(AppEvent::SpawnVehicle);
        publisher.publish(AppEvent::SendTelemetry);
        publisher.publish(AppEvent::SpawnVehicle);

        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                AppEvent::SpawnVehicle,
                AppEvent::SendTelemetry,
                AppEvent::SpawnVehicle
            ]
        );
    }

    #[test]
    fn test_drain_empties_queue() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        publisher.publish(AppEvent::SpawnVehicle);

        assert_eq!(bus.drain().len(), 1);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_publish_from_other_thread() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        std::thread::spawn(move || publisher.publish(AppEvent::SensorUnavailable))
            .join()
            .unwrap();

        assert_eq!(bus.try_recv(), Some(AppEvent::SensorUnavailable));
        assert_eq!(bus.try_recv(), None);
    }

    #[test]
    fn test_publish_after_bus_drop_is_noop() {
        let bus = EventBus::new();
        let publisher = bus.publisher();
        drop(bus);
        // Receiver gone: publishing is a silent no-op
        publisher.publish(AppEvent::SpawnVehicle);
    }
}
