//! Battery widget state behind the presenter's sink traits.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use droplink_indicator::{IconSink, LabelSink, SinkSet, TooltipSink, VisibilitySink};

/// Icon shown until the device supplies a real battery icon.
pub const FALLBACK_ICON: &str = "battery-missing-symbolic";

/// The battery element of a device's menu header, as plain state.
///
/// Implements all four sink traits over interior-mutable cells, so a
/// single `Rc<BatteryWidget>` serves as the presenter's complete
/// [`SinkSet`]. Starts hidden with the fallback icon; the presenter's
/// initial sync decides what is actually shown.
#[derive(Debug)]
pub struct BatteryWidget {
    visible: Cell<bool>,
    label: RefCell<String>,
    icon_name: RefCell<String>,
    tooltip: RefCell<Option<String>>,
}

impl BatteryWidget {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            visible: Cell::new(false),
            label: RefCell::new(String::new()),
            icon_name: RefCell::new(FALLBACK_ICON.to_owned()),
            tooltip: RefCell::new(None),
        })
    }

    /// Bundles this widget as the presenter's sink set.
    pub fn sink_set(self: &Rc<Self>) -> SinkSet {
        SinkSet {
            visibility: Rc::clone(self) as Rc<dyn VisibilitySink>,
            label: Rc::clone(self) as Rc<dyn LabelSink>,
            icon: Rc::clone(self) as Rc<dyn IconSink>,
            tooltip: Rc::clone(self) as Rc<dyn TooltipSink>,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// The short percentage label; empty while the level is unknown.
    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    pub fn icon_name(&self) -> String {
        self.icon_name.borrow().clone()
    }

    /// The long descriptive estimate, if one has been pushed.
    pub fn tooltip(&self) -> Option<String> {
        self.tooltip.borrow().clone()
    }
}

impl VisibilitySink for BatteryWidget {
    fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }
}

impl LabelSink for BatteryWidget {
    fn set_text(&self, text: &str) {
        *self.label.borrow_mut() = text.to_owned();
    }
}

impl IconSink for BatteryWidget {
    fn set_icon_name(&self, icon_name: &str) {
        *self.icon_name.borrow_mut() = icon_name.to_owned();
    }
}

impl TooltipSink for BatteryWidget {
    fn set_text(&self, text: Option<&str>) {
        *self.tooltip.borrow_mut() = text.map(str::to_owned);
    }
}
