//! Device popup menu model: header row plus action rows.

use crate::widget::BatteryWidget;

/// Actions that can be triggered from the device menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Activate the named device action.
    Activate(String),
}

/// A single menu row.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Themed icon, for icon-style menus.
    pub icon_name: Option<String>,
    /// Whether the row is enabled (clickable).
    pub enabled: bool,
    /// Optional action triggered on click.
    pub action: Option<MenuAction>,
}

/// How the action rows are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Compact icon grid; rows carry their icon, labels serve as
    /// accessible names.
    Icon,
    /// Full list; label-only rows.
    List,
}

/// One activatable entry from the device's menu model.
#[derive(Debug, Clone)]
pub struct ActionEntry {
    /// Action name on the device's action group.
    pub action: String,
    /// Translated display label.
    pub label: String,
    /// Themed icon name.
    pub icon_name: String,
    /// Whether the action is currently enabled.
    pub enabled: bool,
}

/// Current state used to build the device menu.
#[derive(Debug, Clone)]
pub struct DeviceMenuState {
    /// Device display name, shown in the header.
    pub device_name: String,
    /// Battery readout for the header, when the battery is known.
    pub battery_summary: Option<String>,
    /// Presentation of the action rows.
    pub kind: MenuKind,
    /// Activatable device actions, in model order.
    pub actions: Vec<ActionEntry>,
}

impl DeviceMenuState {
    /// Captures the current battery readout from the widget.
    pub fn new(
        device_name: impl Into<String>,
        kind: MenuKind,
        actions: Vec<ActionEntry>,
        battery: &BatteryWidget,
    ) -> Self {
        let battery_summary = if battery.is_visible() {
            // Prefer the descriptive estimate; fall back to the raw label.
            battery.tooltip().or_else(|| {
                let label = battery.label();
                (!label.is_empty()).then_some(label)
            })
        } else {
            None
        };

        Self {
            device_name: device_name.into(),
            battery_summary,
            kind,
            actions,
        }
    }

    /// Builds the menu rows from the current state.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        let mut items = Vec::new();

        // Header: device name, with the battery readout when known.
        let label = match &self.battery_summary {
            Some(summary) => format!("{} — {summary}", self.device_name),
            None => self.device_name.clone(),
        };
        items.push(MenuItem {
            label,
            icon_name: None,
            enabled: false,
            action: None,
        });

        // Separator (represented as a disabled empty row).
        items.push(MenuItem {
            label: String::new(),
            icon_name: None,
            enabled: false,
            action: None,
        });

        for entry in &self.actions {
            items.push(MenuItem {
                label: entry.label.clone(),
                icon_name: match self.kind {
                    MenuKind::Icon => Some(entry.icon_name.clone()),
                    MenuKind::List => None,
                },
                enabled: entry.enabled,
                action: Some(MenuAction::Activate(entry.action.clone())),
            });
        }

        tracing::debug!(device = %self.device_name, rows = items.len(), "built device menu");
        items
    }
}
