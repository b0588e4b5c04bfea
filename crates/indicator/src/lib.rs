//! Battery state synchronization core for the DropLink status indicator.
//!
//! State flows one direction: the device's action group notifies a
//! [`StateTracker`], which decodes updates for the `"battery"` action into
//! [`BatterySnapshot`] values; a [`BatteryPresenter`] derives the display
//! state and pushes it to a set of write-only sinks. There is no feedback
//! loop and no polling — every sink write happens synchronously inside the
//! notification that caused it.

mod presenter;
mod sinks;
mod snapshot;
mod strings;
mod tracker;

pub use presenter::{
    BATTERY_ACTION, BatteryPresenter, DeviceHandle, PresenterConfig, long_label, short_label,
};
pub use sinks::{IconSink, LabelSink, SinkSet, TooltipSink, VisibilitySink};
pub use snapshot::BatterySnapshot;
pub use strings::{BatteryStrings, EnglishStrings};
pub use tracker::{ChangeHandler, StateTracker};
