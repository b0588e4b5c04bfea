//! Headless status-area models for a DropLink device.
//!
//! The synchronization core in `droplink-indicator` talks to abstract
//! sinks; this crate supplies a toolkit-independent implementation:
//! - [`BatteryWidget`] — interior-mutable cells behind the four sink traits
//! - [`DeviceMenuState`] — builds the device popup menu rows
//! - [`IndicatorState`] — the status-area entry for one device
//!
//! A toolkit adapter renders these models; nothing here draws.

mod indicator;
mod menu;
mod widget;

pub use indicator::IndicatorState;
pub use menu::{ActionEntry, DeviceMenuState, MenuAction, MenuItem, MenuKind};
pub use widget::{BatteryWidget, FALLBACK_ICON};
