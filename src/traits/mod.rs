//! Trait seams exposed by the crate.
//!
//! Hosts that want to abstract over the concrete [`Thermal`] bridge (for
//! dependency injection or test doubles) can hold a
//! `Box<dyn ThermalMonitor>` instead.

use async_trait::async_trait;

use crate::thermal::types::{ThermalEvent, ThermalState};
use crate::thermal::Thermal;

/// Asynchronous query facade over a thermal bridge.
///
/// Every accessor consults the live platform state at call time and never
/// fails: missing capability is reported as `unknown`/`"UNSUPPORTED"`
/// values, not errors.
#[async_trait]
pub trait ThermalMonitor: Send + Sync {
    /// Whether the device supports thermal status monitoring.
    async fn is_available(&self) -> bool;

    /// Current coarse thermal state.
    async fn thermal_state(&self) -> ThermalState;

    /// Current full thermal info.
    async fn thermal_info(&self) -> ThermalEvent;
}

#[async_trait]
impl ThermalMonitor for Thermal {
    async fn is_available(&self) -> bool {
        Thermal::is_available(self).await
    }

    async fn thermal_state(&self) -> ThermalState {
        Thermal::thermal_state(self).await
    }

    async fn thermal_info(&self) -> ThermalEvent {
        Thermal::thermal_info(self).await
    }
}
