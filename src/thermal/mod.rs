//! Thermal-throttling status bridge.
//!
//! This module is the crate's entry point. [`Thermal`] wraps the platform
//! thermal service behind a uniform async surface: three query accessors
//! (availability, coarse state, full info) and a reference-counted
//! subscription for thermal-change events.
//!
//! ## Subscription lifecycle
//!
//! The bridge keeps exactly one native observer alive, no matter how many
//! listeners are attached. The first `add_listener` registers it, the last
//! `remove_listeners` (or [`Thermal::shutdown`], or dropping the bridge)
//! deregisters it. Native callbacks are relayed through the tokio runtime
//! before listeners see them, so listener code never runs on a platform
//! callback thread.
//!
//! ## Example
//!
//! ```no_run
//! use device_thermal::thermal::Thermal;
//!
//! #[tokio::main]
//! async fn main() {
//!     let thermal = Thermal::new();
//!
//!     if thermal.is_available().await {
//!         let info = thermal.thermal_info().await;
//!         println!("current: {} ({})", info.state, info.platform_state);
//!     }
//!
//!     let mut events = thermal.add_listener("thermalDidChange");
//!     while let Ok(event) = events.recv().await {
//!         println!("thermal state changed: {}", event.state);
//!     }
//! }
//! ```

pub mod constants;
mod relay;
pub mod types;

#[cfg(test)]
mod tests;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, instrument, trace, warn};

use crate::service::{self, ThermalService};
use crate::thermal::constants::THERMAL_STATUS_NONE;
use crate::thermal::relay::{EventBus, RelayHandle};
use crate::thermal::types::{ThermalEvent, ThermalState, ThermalStatus};

/// Mutable bridge state: the listener count and the native observer it
/// gates. Guarded by one lock so the 0→1 and 1→0 transitions are atomic.
struct ObserverState {
    subscribers: usize,
    relay: Option<RelayHandle>,
}

/// Bridge between host applications and the platform thermal service.
///
/// Cheap to construct; no platform connection is made until the first
/// listener is added. Safe to share as `Arc<Thermal>`: all state sits
/// behind an internal lock. Queries never fail: on devices without
/// thermal support they degrade to `unknown`/`"UNSUPPORTED"` answers.
pub struct Thermal {
    service: Box<dyn ThermalService>,
    bus: EventBus,
    observer: Mutex<ObserverState>,
}

impl Thermal {
    /// Creates a bridge over the platform's default thermal backend
    /// (`PowerManager` on Android, an inert stub elsewhere).
    pub fn new() -> Self {
        Self::with_service(service::platform_default())
    }

    /// Creates a bridge over a specific backend. Useful for tests and for
    /// hosts that inject their own [`ThermalService`].
    pub fn with_service(service: Box<dyn ThermalService>) -> Self {
        Self {
            service,
            bus: EventBus::default(),
            observer: Mutex::new(ObserverState {
                subscribers: 0,
                relay: None,
            }),
        }
    }

    /// Whether this device supports thermal status monitoring.
    ///
    /// Deterministic for a given OS version; absence of the capability is a
    /// normal `false`, never an error.
    pub async fn is_available(&self) -> bool {
        self.service.is_supported()
    }

    /// Current coarse thermal state, re-read from the platform on every
    /// call. `Unknown` on unsupported devices.
    pub async fn thermal_state(&self) -> ThermalState {
        if !self.service.is_supported() {
            return ThermalState::Unknown;
        }
        let raw = self.service.current_status().unwrap_or(THERMAL_STATUS_NONE);
        let state = ThermalStatus::from_raw(raw).state();
        trace!(raw, %state, "queried thermal state");
        state
    }

    /// Current full thermal info, re-read from the platform on every call.
    /// The `"UNSUPPORTED"` sentinel event on unsupported devices.
    ///
    /// A supported device whose service handle is missing reports the
    /// no-throttling status rather than an error.
    pub async fn thermal_info(&self) -> ThermalEvent {
        if !self.service.is_supported() {
            return ThermalEvent::unsupported();
        }
        let raw = self.service.current_status().unwrap_or(THERMAL_STATUS_NONE);
        ThermalEvent::from_raw(raw)
    }

    /// Attaches a listener and returns its event stream.
    ///
    /// The first listener registers the single native observer; later
    /// listeners only bump the count and tap into the same stream.
    /// `event_name` does not filter: every registration feeds the
    /// [`constants::THERMAL_DID_CHANGE`] channel. On unsupported devices
    /// the returned receiver simply never yields.
    ///
    /// Event delivery needs a tokio runtime. Called outside one, the
    /// listener still attaches but no native observer is registered and
    /// no events flow.
    #[instrument(level = "trace", skip(self))]
    pub fn add_listener(&self, event_name: &str) -> broadcast::Receiver<ThermalEvent> {
        let mut observer = self.observer.lock();
        observer.subscribers += 1;
        trace!(subscribers = observer.subscribers, "listener added");

        // Tap the bus before registering: the platform may invoke a fresh
        // observer immediately with the current status, and that first
        // event must reach this receiver.
        let rx = self.bus.subscribe();

        if observer.subscribers == 1 && observer.relay.is_none() && self.service.is_supported() {
            match tokio::runtime::Handle::try_current() {
                Ok(_) => {
                    let (relay, sink) = RelayHandle::spawn(&self.bus);
                    match self.service.register_observer(sink) {
                        Ok(()) => {
                            debug!("native thermal observer registered");
                            observer.relay = Some(relay);
                        }
                        Err(e) => {
                            // Listener stays attached; it just won't see events.
                            warn!("failed to register native thermal observer: {e}");
                            relay.stop();
                        }
                    }
                }
                Err(e) => {
                    warn!("no tokio runtime, thermal events will not be delivered: {e}");
                }
            }
        }

        rx
    }

    /// Detaches `count` listeners, floored at zero. Deregisters the native
    /// observer when the last listener goes away; over-removal is harmless.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_listeners(&self, count: usize) {
        let mut observer = self.observer.lock();
        observer.subscribers = observer.subscribers.saturating_sub(count);
        trace!(subscribers = observer.subscribers, "listeners removed");

        if observer.subscribers == 0 {
            self.deactivate(&mut observer);
        }
    }

    /// Tears the bridge down: unconditionally deregisters the native
    /// observer and resets the listener count. Idempotent; also invoked on
    /// drop. The bridge can be re-activated by a later `add_listener`.
    pub fn shutdown(&self) {
        let mut observer = self.observer.lock();
        observer.subscribers = 0;
        self.deactivate(&mut observer);
    }

    /// Number of currently-attached listeners.
    pub fn subscriber_count(&self) -> usize {
        self.observer.lock().subscribers
    }

    /// Whether the single native observer is currently registered.
    pub fn has_native_observer(&self) -> bool {
        self.observer.lock().relay.is_some()
    }

    fn deactivate(&self, observer: &mut ObserverState) {
        if let Some(relay) = observer.relay.take() {
            self.service.unregister_observer();
            relay.stop();
            debug!("native thermal observer deregistered");
        }
    }
}

impl Default for Thermal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Thermal {
    fn drop(&mut self) {
        self.shutdown();
    }
}
