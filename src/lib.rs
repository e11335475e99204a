//! Device Thermal - A Rust library exposing device thermal-throttling status
//!
//! This crate bridges the platform's native thermal API into a small,
//! uniform async surface: query the current thermal state and subscribe to
//! thermal-state-change notifications. It targets application runtimes that
//! need to adapt behavior (e.g. throttle background work) when the device
//! overheats.
//!
//! # Features
//!
//! - **State queries**: availability, coarse severity, and full thermal info
//! - **Change notifications**: a broadcast stream of normalized events,
//!   backed by a single reference-counted native observer
//! - **Graceful degradation**: unsupported devices answer with inert
//!   defaults instead of errors
//! - **Android backend**: `android.os.PowerManager` thermal status (API 29+)
//!   over JNI; other platforms compile against an inert stub
//!
//! # Examples
//!
//! ```no_run
//! use device_thermal::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let thermal = Thermal::new();
//!
//!     println!("thermal monitoring available: {}", thermal.is_available().await);
//!     println!("current state: {}", thermal.thermal_state().await);
//!
//!     let mut events = thermal.add_listener(THERMAL_DID_CHANGE);
//!     if let Ok(event) = events.recv().await {
//!         if event.state >= ThermalState::Serious {
//!             // shed background work
//!         }
//!     }
//!     thermal.remove_listeners(1);
//! }
//! ```
//!
//! # Error Handling
//!
//! The public query and subscription surface never fails: a device without
//! thermal support is a normal `false`/`unknown` answer, not an error. The
//! crate [`Error`](error::Error) type only appears at the
//! [`ThermalService`](service::ThermalService) seam, where backend calls
//! (JNI on Android) can genuinely go wrong.
//!
//! # Thread Safety
//!
//! [`Thermal`](thermal::Thermal) is `Send + Sync` and safe to share as
//! `Arc<Thermal>`. Native callbacks may arrive on any thread; events are
//! relayed through the tokio runtime before listeners observe them.

pub mod error;
pub mod service;
pub mod thermal;
pub mod traits;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::service::ThermalService;
    pub use crate::thermal::constants::THERMAL_DID_CHANGE;
    pub use crate::thermal::types::{ThermalEvent, ThermalState, ThermalStatus};
    pub use crate::thermal::Thermal;
    pub use crate::traits::ThermalMonitor;
}
