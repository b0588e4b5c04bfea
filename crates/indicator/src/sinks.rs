//! Write-only destinations for derived display values.
//!
//! Each sink abstracts one capability of the host toolkit's widget tree;
//! adapters implement them per toolkit (see the `droplink-shell-menu`
//! crate for a headless one). Implementations take `&self` and keep their
//! own interior mutability, the way toolkit handles do.

use std::rc::Rc;

/// Shows or hides the whole battery element.
pub trait VisibilitySink {
    fn set_visible(&self, visible: bool);
}

/// Short percentage label next to the icon.
pub trait LabelSink {
    fn set_text(&self, text: &str);
}

/// Themed battery icon.
pub trait IconSink {
    fn set_icon_name(&self, icon_name: &str);
}

/// Hover tooltip carrying the time estimate.
pub trait TooltipSink {
    fn set_text(&self, text: Option<&str>);
}

/// The full set of sinks a presenter fans out to.
///
/// All four are required; a clone shares the same underlying sinks.
#[derive(Clone)]
pub struct SinkSet {
    pub visibility: Rc<dyn VisibilitySink>,
    pub label: Rc<dyn LabelSink>,
    pub icon: Rc<dyn IconSink>,
    pub tooltip: Rc<dyn TooltipSink>,
}
