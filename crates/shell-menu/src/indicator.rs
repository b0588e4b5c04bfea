//! Status-area entry for one device.

use droplink_indicator::DeviceHandle;

use crate::menu::DeviceMenuState;

/// The status-area indicator model: icon, accessible title, and the
/// device menu it opens.
#[derive(Debug, Clone)]
pub struct IndicatorState {
    /// Accessible title, `"{device name} Indicator"`.
    pub title: String,
    /// The device's own themed icon.
    pub icon_name: String,
    /// Menu shown when the indicator is activated.
    pub menu: DeviceMenuState,
}

impl IndicatorState {
    pub fn new(device: &DeviceHandle, menu: DeviceMenuState) -> Self {
        Self {
            title: format!("{} Indicator", device.name),
            icon_name: device.icon_name.clone(),
            menu,
        }
    }
}
