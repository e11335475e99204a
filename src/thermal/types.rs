use std::fmt;

use serde::{Deserialize, Serialize};

use crate::thermal::constants::{
    PLATFORM_STATE_UNKNOWN, PLATFORM_STATE_UNSUPPORTED, THERMAL_STATUS_CRITICAL, THERMAL_STATUS_EMERGENCY,
    THERMAL_STATUS_LIGHT, THERMAL_STATUS_MODERATE, THERMAL_STATUS_NONE, THERMAL_STATUS_SEVERE,
    THERMAL_STATUS_SHUTDOWN,
};

/// Coarse, platform-independent thermal severity ladder.
///
/// This is the value host applications branch on when deciding whether to
/// shed work; the raw platform status is carried separately in
/// [`ThermalEvent::platform_state`]. Variants are ordered by escalation
/// (`Fair < Serious`), with `Unknown` sorting below `Nominal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalState {
    /// Severity could not be determined (unsupported device or unrecognized code)
    #[default]
    Unknown,
    /// No thermal throttling
    Nominal,
    /// Light to moderate throttling
    Fair,
    /// Severe throttling, UX is affected
    Serious,
    /// Device is close to (or past) forced shutdown territory
    Critical,
}

impl ThermalState {
    /// Lowercase wire representation, e.g. `"serious"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThermalState::Unknown => "unknown",
            ThermalState::Nominal => "nominal",
            ThermalState::Fair => "fair",
            ThermalState::Serious => "serious",
            ThermalState::Critical => "critical",
        }
    }
}

impl fmt::Display for ThermalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of a raw native thermal status code.
///
/// Every `i32` maps to a variant; codes outside the range defined by
/// `PowerManager` land in [`ThermalStatus::Unrecognized`] rather than an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermalStatus {
    None,
    Light,
    Moderate,
    Severe,
    Critical,
    Emergency,
    Shutdown,
    Unrecognized(i32),
}

impl ThermalStatus {
    /// Converts a raw platform status code into its typed form. Total: never
    /// fails, unknown codes become [`ThermalStatus::Unrecognized`].
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            THERMAL_STATUS_NONE => ThermalStatus::None,
            THERMAL_STATUS_LIGHT => ThermalStatus::Light,
            THERMAL_STATUS_MODERATE => ThermalStatus::Moderate,
            THERMAL_STATUS_SEVERE => ThermalStatus::Severe,
            THERMAL_STATUS_CRITICAL => ThermalStatus::Critical,
            THERMAL_STATUS_EMERGENCY => ThermalStatus::Emergency,
            THERMAL_STATUS_SHUTDOWN => ThermalStatus::Shutdown,
            other => ThermalStatus::Unrecognized(other),
        }
    }

    /// The raw platform code this status was derived from.
    pub fn raw(&self) -> i32 {
        match self {
            ThermalStatus::None => THERMAL_STATUS_NONE,
            ThermalStatus::Light => THERMAL_STATUS_LIGHT,
            ThermalStatus::Moderate => THERMAL_STATUS_MODERATE,
            ThermalStatus::Severe => THERMAL_STATUS_SEVERE,
            ThermalStatus::Critical => THERMAL_STATUS_CRITICAL,
            ThermalStatus::Emergency => THERMAL_STATUS_EMERGENCY,
            ThermalStatus::Shutdown => THERMAL_STATUS_SHUTDOWN,
            ThermalStatus::Unrecognized(raw) => *raw,
        }
    }

    /// Verbatim platform label for this status, e.g. `"THERMAL_STATUS_SEVERE"`.
    pub fn platform_label(&self) -> &'static str {
        match self {
            ThermalStatus::None => "THERMAL_STATUS_NONE",
            ThermalStatus::Light => "THERMAL_STATUS_LIGHT",
            ThermalStatus::Moderate => "THERMAL_STATUS_MODERATE",
            ThermalStatus::Severe => "THERMAL_STATUS_SEVERE",
            ThermalStatus::Critical => "THERMAL_STATUS_CRITICAL",
            ThermalStatus::Emergency => "THERMAL_STATUS_EMERGENCY",
            ThermalStatus::Shutdown => "THERMAL_STATUS_SHUTDOWN",
            ThermalStatus::Unrecognized(_) => PLATFORM_STATE_UNKNOWN,
        }
    }

    /// Collapses the platform status onto the coarse severity ladder.
    pub fn state(&self) -> ThermalState {
        match self {
            ThermalStatus::None => ThermalState::Nominal,
            ThermalStatus::Light | ThermalStatus::Moderate => ThermalState::Fair,
            ThermalStatus::Severe => ThermalState::Serious,
            ThermalStatus::Critical | ThermalStatus::Emergency | ThermalStatus::Shutdown => ThermalState::Critical,
            ThermalStatus::Unrecognized(_) => ThermalState::Unknown,
        }
    }
}

/// A normalized thermal notification as delivered to host applications.
///
/// Serialized field names match the cross-language payload contract
/// (`state`, `platformState`, `temperature`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermalEvent {
    /// Coarse severity, see [`ThermalState`]
    pub state: ThermalState,
    /// Verbatim platform label, or the `"UNSUPPORTED"` sentinel
    pub platform_state: String,
    /// Numeric reading in degrees Celsius. Always `None` on Android:
    /// `PowerManager` does not expose one. Kept for platforms that might.
    pub temperature: Option<f64>,
}

impl ThermalEvent {
    /// Normalizes a platform status into the outward-facing event. Pure:
    /// the result depends on nothing but `status`.
    pub fn from_status(status: ThermalStatus) -> Self {
        Self {
            state: status.state(),
            platform_state: status.platform_label().to_string(),
            temperature: None,
        }
    }

    /// Normalizes a raw platform status code, see [`ThermalEvent::from_status`].
    pub fn from_raw(raw: i32) -> Self {
        Self::from_status(ThermalStatus::from_raw(raw))
    }

    /// The event reported on devices without thermal monitoring support.
    pub fn unsupported() -> Self {
        Self {
            state: ThermalState::Unknown,
            platform_state: PLATFORM_STATE_UNSUPPORTED.to_string(),
            temperature: None,
        }
    }
}
