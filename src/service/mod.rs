//! Native thermal service seam.
//!
//! The rest of the crate talks to the platform exclusively through the
//! [`ThermalService`] trait, so the bridge logic stays platform-agnostic and
//! unit tests can substitute a mock. Two backends exist: the Android
//! `PowerManager` implementation and an inert stub for everything else.

use std::fmt::Debug;

use tokio::sync::mpsc;

#[cfg(test)]
use mockall::automock;

use crate::error::Result;

#[cfg(target_os = "android")]
pub mod android;
pub mod unsupported;

#[cfg(target_os = "android")]
pub use android::PowerManagerService;
pub use unsupported::UnsupportedService;

/// Channel endpoint a backend pushes raw status codes into.
///
/// Backends may deliver from any thread; the bridge relays into the host's
/// async context before listeners see anything.
pub type StatusSink = mpsc::UnboundedSender<i32>;

/// Platform access used by the thermal bridge.
///
/// Capability absence is a value here, never an error: `is_supported`
/// answers `false` and `current_status` answers `None` on devices without
/// thermal monitoring. `Result` only surfaces genuine backend failures
/// (e.g. a JNI call going wrong).
#[cfg_attr(test, automock)]
pub trait ThermalService: Debug + Send + Sync {
    /// Whether the running OS supports thermal status monitoring at all.
    fn is_supported(&self) -> bool;

    /// Current raw thermal status code, or `None` when the platform service
    /// handle is missing.
    fn current_status(&self) -> Option<i32>;

    /// Register the single native status observer. Every subsequent status
    /// change is pushed into `sink` until deregistration.
    fn register_observer(&self, sink: StatusSink) -> Result<()>;

    /// Deregister the native status observer, if any. Idempotent.
    fn unregister_observer(&self);
}

/// Returns the thermal service backend for the compilation target.
pub fn platform_default() -> Box<dyn ThermalService> {
    #[cfg(target_os = "android")]
    {
        Box::new(android::PowerManagerService::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        Box::new(unsupported::UnsupportedService)
    }
}
