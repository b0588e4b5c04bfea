//! Derives display state from battery snapshots and fans it out to sinks.

use std::rc::Rc;

use droplink_action_group::{ActionGroup, DecodeError};

use crate::sinks::SinkSet;
use crate::snapshot::BatterySnapshot;
use crate::strings::BatteryStrings;
use crate::tracker::StateTracker;

/// Name of the device action the presenter follows.
pub const BATTERY_ACTION: &str = "battery";

/// A remotely-connected device as the indicator sees it.
#[derive(Clone)]
pub struct DeviceHandle {
    /// Display name shown in the menu header.
    pub name: String,
    /// Themed icon representing the device itself.
    pub icon_name: String,
    /// The device's action group.
    pub actions: Rc<dyn ActionGroup>,
}

/// Everything a presenter needs, supplied explicitly at construction.
pub struct PresenterConfig {
    pub device: DeviceHandle,
    pub sinks: SinkSet,
    pub strings: Rc<dyn BatteryStrings>,
}

/// Keeps the battery sinks consistent with the device's battery action.
///
/// Owns one [`StateTracker`] bound to [`BATTERY_ACTION`]; the tracker's
/// change callback is the sole trigger for recomputation — no polling, no
/// timers. Dropping the presenter detaches the tracker before the sink
/// references are released, so no callback ever reaches a torn-down view.
pub struct BatteryPresenter {
    tracker: StateTracker,
    sinks: SinkSet,
    strings: Rc<dyn BatteryStrings>,
}

impl BatteryPresenter {
    /// Attaches to the device's battery action and runs the first sync.
    pub fn new(config: PresenterConfig) -> Result<Self, DecodeError> {
        let PresenterConfig {
            device,
            sinks,
            strings,
        } = config;

        let view_sinks = sinks.clone();
        let view_strings = Rc::clone(&strings);
        let tracker = StateTracker::attach(
            device.actions,
            BATTERY_ACTION,
            Box::new(move |snapshot| {
                push_views(snapshot, &view_sinks, view_strings.as_ref());
            }),
        )?;

        Ok(Self {
            tracker,
            sinks,
            strings,
        })
    }

    /// The latest decoded battery state, `None` while unavailable.
    pub fn snapshot(&self) -> Option<BatterySnapshot> {
        self.tracker.snapshot()
    }

    /// Recomputes every derived view from the current snapshot.
    ///
    /// Pure given the snapshot: syncing twice with unchanged state writes
    /// identical values. Normally driven by the tracker; exposed for hosts
    /// that rebuild their widget tree.
    pub fn sync(&self) {
        push_views(
            self.tracker.snapshot().as_ref(),
            &self.sinks,
            self.strings.as_ref(),
        );
    }

    /// Stops tracking. Idempotent; also runs on drop.
    pub fn detach(&mut self) {
        self.tracker.detach();
    }
}

impl Drop for BatteryPresenter {
    fn drop(&mut self) {
        // Detach before the sink references go away.
        self.tracker.detach();
    }
}

/// Pushes the derived view of `snapshot` to the sinks.
///
/// When the snapshot is absent only visibility is written; the remaining
/// sinks keep their last values, consistent with a hidden element.
fn push_views(snapshot: Option<&BatterySnapshot>, sinks: &SinkSet, strings: &dyn BatteryStrings) {
    let Some(snapshot) = snapshot else {
        sinks.visibility.set_visible(false);
        return;
    };

    sinks.visibility.set_visible(true);
    sinks.icon.set_icon_name(&snapshot.icon_name);
    sinks.label.set_text(&short_label(snapshot));
    sinks.tooltip.set_text(Some(&long_label(snapshot, strings)));
}

/// The short percentage label: `"{level}%"`, or empty when unknown.
pub fn short_label(snapshot: &BatterySnapshot) -> String {
    if snapshot.level > -1 {
        format!("{}%", snapshot.level)
    } else {
        String::new()
    }
}

/// The long descriptive label shown as a tooltip.
///
/// Full charge wins over everything; a zero time estimate means the device
/// is still estimating; otherwise the estimate is rendered as `H:MM` with
/// unpadded hours (may exceed 24) and the charging direction.
pub fn long_label(snapshot: &BatterySnapshot, strings: &dyn BatteryStrings) -> String {
    if snapshot.level == 100 {
        return strings.fully_charged();
    }

    if snapshot.time_seconds == 0 {
        return strings.estimating(snapshot.level);
    }

    let total_minutes = snapshot.time_seconds / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if snapshot.charging {
        strings.until_full(snapshot.level, hours, minutes)
    } else {
        strings.remaining(snapshot.level, hours, minutes)
    }
}
