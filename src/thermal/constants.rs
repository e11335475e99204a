/// Name of the broadcast channel carrying thermal-change events.
pub const THERMAL_DID_CHANGE: &str = "thermalDidChange";

/// First Android API level with `PowerManager` thermal status support.
pub const MIN_ANDROID_API: i32 = 29;

/// Sentinel platform label reported when thermal monitoring is unavailable.
pub const PLATFORM_STATE_UNSUPPORTED: &str = "UNSUPPORTED";

/// Sentinel platform label reported for status codes outside the known range.
pub const PLATFORM_STATE_UNKNOWN: &str = "THERMAL_STATUS_UNKNOWN";

// Raw status codes, matching android.os.PowerManager.THERMAL_STATUS_*.
pub const THERMAL_STATUS_NONE: i32 = 0;
pub const THERMAL_STATUS_LIGHT: i32 = 1;
pub const THERMAL_STATUS_MODERATE: i32 = 2;
pub const THERMAL_STATUS_SEVERE: i32 = 3;
pub const THERMAL_STATUS_CRITICAL: i32 = 4;
pub const THERMAL_STATUS_EMERGENCY: i32 = 5;
pub const THERMAL_STATUS_SHUTDOWN: i32 = 6;

/// Default buffer capacity for the thermal event broadcast channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
