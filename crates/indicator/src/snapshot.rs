//! Decoded battery state.

use droplink_action_group::{ActionValue, DecodeError};

/// Battery state at a point in time, decoded from the action payload.
///
/// Existence of a snapshot means the `"battery"` action is currently
/// registered on the source. An absent battery is `None` at the tracker —
/// distinct from a snapshot with `level == -1` (registered but unknown
/// charge).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatterySnapshot {
    /// Whether the device reports it is charging.
    pub charging: bool,
    /// Themed icon name supplied by the device.
    pub icon_name: String,
    /// Charge percentage in `[0, 100]`, or `-1` when unknown.
    pub level: i32,
    /// Seconds until full (charging) or empty (discharging); `0` means no
    /// estimate is available.
    pub time_seconds: i64,
}

impl BatterySnapshot {
    /// Decodes the 4-tuple `(charging, icon_name, level, time)` payload.
    ///
    /// Wrong arity or types, a level outside `[-1, 100]`, or a negative
    /// time estimate are all fatal: the producer broke the action-state
    /// contract.
    pub fn decode(value: &ActionValue) -> Result<Self, DecodeError> {
        let (charging, icon_name, level, time_seconds) =
            value.decode::<(bool, String, i32, i64)>()?;

        if !(-1..=100).contains(&level) {
            return Err(DecodeError::Invalid(format!(
                "battery level {level} outside [-1, 100]"
            )));
        }
        if time_seconds < 0 {
            return Err(DecodeError::Invalid(format!(
                "negative battery time estimate {time_seconds}"
            )));
        }

        Ok(Self {
            charging,
            icon_name,
            level,
            time_seconds,
        })
    }
}
