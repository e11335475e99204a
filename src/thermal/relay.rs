//! Fan-out of native thermal notifications to subscribed listeners.
//!
//! Native callbacks arrive on an implementation-chosen thread. They are
//! pushed into an unbounded mpsc channel ([`crate::service::StatusSink`])
//! and a relay task running on the host's tokio runtime normalizes each raw
//! status and republishes it on a `broadcast` channel. Listeners therefore
//! only ever observe events from the async context they already live in.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::trace;

use crate::service::StatusSink;
use crate::thermal::constants::EVENT_CHANNEL_CAPACITY;
use crate::thermal::types::ThermalEvent;

/// In-process fan-out bus for [`ThermalEvent`]s.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers independently
/// receive every published event, in publish order.
#[derive(Clone)]
pub(crate) struct EventBus {
    sender: broadcast::Sender<ThermalEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity. Slow receivers that
    /// fall more than `capacity` events behind observe `RecvError::Lagged`.
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers. With zero subscribers
    /// the event is silently dropped.
    pub(crate) fn publish(&self, event: ThermalEvent) {
        // Ignore the SendError, it only means there are no receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published after this call.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ThermalEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(EVENT_CHANNEL_CAPACITY)
    }
}

/// Handle to the single running relay task.
///
/// Exists only while the bridge holds an active native observer; dropping
/// the bridge or deregistering the last listener stops the task.
pub(crate) struct RelayHandle {
    task: JoinHandle<()>,
}

impl RelayHandle {
    /// Spawns the relay task for `bus` and returns the sink the native
    /// service should push raw status codes into.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(bus: &EventBus) -> (Self, StatusSink) {
        let (tx, mut rx) = mpsc::unbounded_channel::<i32>();
        let bus = bus.clone();
        let task = tokio::spawn(async move {
            while let Some(raw) = rx.recv().await {
                let event = ThermalEvent::from_raw(raw);
                trace!(raw, state = %event.state, "relaying thermal status change");
                bus.publish(event);
            }
        });
        (Self { task }, tx)
    }

    /// Stops the relay. Any status codes still queued are discarded; the
    /// native observer must already be deregistered at this point.
    pub(crate) fn stop(self) {
        self.task.abort();
    }
}
