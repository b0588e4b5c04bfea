//! Tracks one action's state across an action group's notifications.

use std::cell::RefCell;
use std::rc::Rc;

use droplink_action_group::{ActionGroup, DecodeError, SlotId};

use crate::snapshot::BatterySnapshot;

/// Invoked synchronously on every snapshot change, `None` meaning the
/// tracked action is not registered on the source.
pub type ChangeHandler = Box<dyn FnMut(Option<&BatterySnapshot>)>;

/// Follows a single named action on an [`ActionGroup`] and keeps a decoded
/// snapshot of its state.
///
/// [`attach`](Self::attach) registers three listeners (added, removed,
/// state-changed), each filtered to the tracked name, then runs an initial
/// presence-check through the same refresh path a live "added" notification
/// takes — so the snapshot is never stale or uninitialized once `attach`
/// returns. [`detach`](Self::detach) is a hard unsubscribe: after it
/// returns, no further change callbacks fire, even if the source refuses to
/// unregister.
pub struct StateTracker {
    source: Rc<dyn ActionGroup>,
    action_name: String,
    inner: Rc<RefCell<TrackerInner>>,
    // Slot order mirrors registration order: added, removed, state-changed.
    slots: Vec<SlotId>,
}

struct TrackerInner {
    snapshot: Option<BatterySnapshot>,
    on_change: ChangeHandler,
    detached: bool,
}

impl StateTracker {
    /// Subscribes to `action_name` on `source` and runs the initial sync.
    ///
    /// A malformed current state is fatal: the partially armed listeners
    /// are released and the error is returned.
    pub fn attach(
        source: Rc<dyn ActionGroup>,
        action_name: impl Into<String>,
        on_change: ChangeHandler,
    ) -> Result<Self, DecodeError> {
        let action_name = action_name.into();
        let inner = Rc::new(RefCell::new(TrackerInner {
            snapshot: None,
            on_change,
            detached: false,
        }));

        let mut slots = Vec::with_capacity(3);

        // "added" can arrive before the state is queryable, and some
        // sources reuse it as a refresh signal: always go back to the
        // source instead of trusting the notification.
        let added_source = Rc::clone(&source);
        let added_inner = Rc::clone(&inner);
        let added_name = action_name.clone();
        slots.push(source.connect_action_added(Box::new(move |name| {
            if name != added_name {
                return Ok(());
            }
            refresh(&added_source, &added_name, &added_inner)
        })));

        let removed_inner = Rc::clone(&inner);
        let removed_name = action_name.clone();
        slots.push(source.connect_action_removed(Box::new(move |name| {
            if name != removed_name {
                return Ok(());
            }
            apply(&removed_inner, None);
            Ok(())
        })));

        let changed_inner = Rc::clone(&inner);
        let changed_name = action_name.clone();
        slots.push(source.connect_action_state_changed(Box::new(move |name, value| {
            if name != changed_name {
                return Ok(());
            }
            // The value is supplied; no presence re-check needed.
            let snapshot = BatterySnapshot::decode(value)?;
            apply(&changed_inner, Some(snapshot));
            Ok(())
        })));

        let mut tracker = Self {
            source,
            action_name,
            inner,
            slots,
        };

        if let Err(err) = refresh(&tracker.source, &tracker.action_name, &tracker.inner) {
            tracker.detach();
            return Err(err);
        }

        tracing::debug!(action = %tracker.action_name, "state tracker attached");
        Ok(tracker)
    }

    /// The latest decoded snapshot, `None` while the action is absent.
    pub fn snapshot(&self) -> Option<BatterySnapshot> {
        self.inner.borrow().snapshot.clone()
    }

    /// The action name this tracker follows.
    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    /// Unregisters all listeners. Idempotent.
    ///
    /// Unregistration is best-effort: a source that is already gone is
    /// logged and otherwise ignored, and the internal detached flag keeps
    /// any still-armed handler inert.
    pub fn detach(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        self.inner.borrow_mut().detached = true;
        for slot in self.slots.drain(..).rev() {
            if let Err(err) = self.source.disconnect(slot) {
                tracing::warn!(%err, action = %self.action_name, "disconnect failed");
            }
        }
        tracing::debug!(action = %self.action_name, "state tracker detached");
    }
}

impl Drop for StateTracker {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Re-checks presence on the source and decodes the current state.
fn refresh(
    source: &Rc<dyn ActionGroup>,
    name: &str,
    inner: &Rc<RefCell<TrackerInner>>,
) -> Result<(), DecodeError> {
    let snapshot = if source.has_action(name) {
        match source.action_state(name) {
            Some(value) => Some(BatterySnapshot::decode(&value)?),
            None => None,
        }
    } else {
        None
    };
    apply(inner, snapshot);
    Ok(())
}

/// Stores the snapshot and notifies, unless the tracker has detached.
fn apply(inner: &Rc<RefCell<TrackerInner>>, snapshot: Option<BatterySnapshot>) {
    let mut guard = inner.borrow_mut();
    if guard.detached {
        return;
    }
    guard.snapshot = snapshot;
    let TrackerInner {
        snapshot, on_change, ..
    } = &mut *guard;
    (on_change)(snapshot.as_ref());
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use droplink_action_group::{ActionValue, LocalActionGroup};
    use serde_json::json;

    use super::*;

    const ACTION: &str = "battery";

    fn value(charging: bool, level: i32, time: i64) -> ActionValue {
        ActionValue::new(json!([charging, "battery-good-symbolic", level, time]))
    }

    struct Fixture {
        group: LocalActionGroup,
        changes: Rc<Cell<u32>>,
        last: Rc<RefCell<Option<BatterySnapshot>>>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                group: LocalActionGroup::new(),
                changes: Rc::new(Cell::new(0)),
                last: Rc::new(RefCell::new(None)),
            }
        }

        fn attach(&self) -> Result<StateTracker, DecodeError> {
            let changes = Rc::clone(&self.changes);
            let last = Rc::clone(&self.last);
            StateTracker::attach(
                Rc::new(self.group.clone()),
                ACTION,
                Box::new(move |snapshot| {
                    changes.set(changes.get() + 1);
                    *last.borrow_mut() = snapshot.cloned();
                }),
            )
        }
    }

    #[test]
    fn initial_sync_with_action_present() {
        let fx = Fixture::new();
        fx.group.add_action(ACTION, value(true, 42, 4500)).unwrap();

        let tracker = fx.attach().unwrap();

        assert_eq!(fx.changes.get(), 1);
        assert_eq!(tracker.snapshot().unwrap().level, 42);
        assert_eq!(fx.last.borrow().as_ref().unwrap().level, 42);
    }

    #[test]
    fn initial_sync_with_action_absent() {
        let fx = Fixture::new();
        let tracker = fx.attach().unwrap();

        // The initial sync still notifies, with None.
        assert_eq!(fx.changes.get(), 1);
        assert!(tracker.snapshot().is_none());
    }

    #[test]
    fn state_change_updates_snapshot() {
        let fx = Fixture::new();
        fx.group.add_action(ACTION, value(false, 50, 0)).unwrap();
        let tracker = fx.attach().unwrap();

        fx.group
            .change_action_state(ACTION, value(false, 49, 7200))
            .unwrap();

        assert_eq!(fx.changes.get(), 2);
        let snapshot = tracker.snapshot().unwrap();
        assert_eq!(snapshot.level, 49);
        assert_eq!(snapshot.time_seconds, 7200);
    }

    #[test]
    fn other_actions_are_ignored() {
        let fx = Fixture::new();
        let tracker = fx.attach().unwrap();
        let initial = fx.changes.get();

        fx.group.add_action("clipboard", value(false, 1, 0)).unwrap();
        fx.group
            .change_action_state("clipboard", value(false, 2, 0))
            .unwrap();
        fx.group.remove_action("clipboard").unwrap();

        assert_eq!(fx.changes.get(), initial);
        assert!(tracker.snapshot().is_none());
    }

    #[test]
    fn removed_transitions_to_none() {
        let fx = Fixture::new();
        fx.group.add_action(ACTION, value(false, 80, 600)).unwrap();
        let tracker = fx.attach().unwrap();

        fx.group.remove_action(ACTION).unwrap();

        assert!(tracker.snapshot().is_none());
        assert!(fx.last.borrow().is_none());
        assert_eq!(fx.changes.get(), 2);
    }

    #[test]
    fn readded_after_removal_recovers() {
        let fx = Fixture::new();
        fx.group.add_action(ACTION, value(false, 80, 600)).unwrap();
        let tracker = fx.attach().unwrap();

        fx.group.remove_action(ACTION).unwrap();
        fx.group.add_action(ACTION, value(true, 81, 540)).unwrap();

        // Not stuck at None: the second "added" re-decoded the new state.
        let snapshot = tracker.snapshot().unwrap();
        assert_eq!(snapshot.level, 81);
        assert!(snapshot.charging);
    }

    #[test]
    fn announced_before_queryable_stays_none() {
        let fx = Fixture::new();
        let tracker = fx.attach().unwrap();

        fx.group.announce_action(ACTION).unwrap();

        // The presence re-check found no state yet.
        assert!(tracker.snapshot().is_none());
        assert_eq!(fx.changes.get(), 2);
    }

    #[test]
    fn malformed_state_change_propagates() {
        let fx = Fixture::new();
        fx.group.add_action(ACTION, value(false, 50, 0)).unwrap();
        let tracker = fx.attach().unwrap();

        let malformed = ActionValue::new(json!([true, "icon", 50]));
        let result = fx.group.change_action_state(ACTION, malformed);

        assert!(matches!(result, Err(DecodeError::Malformed(_))));
        // No partial snapshot: the previous state survives.
        assert_eq!(tracker.snapshot().unwrap().level, 50);
    }

    #[test]
    fn malformed_initial_state_fails_attach() {
        let fx = Fixture::new();
        fx.group
            .add_action(ACTION, ActionValue::new(json!(["broken"])))
            .unwrap();

        assert!(fx.attach().is_err());
        assert_eq!(fx.changes.get(), 0);

        // The failed attach released its listeners.
        fx.group.add_action(ACTION, value(false, 10, 0)).unwrap();
        assert_eq!(fx.changes.get(), 0);
    }

    #[test]
    fn detach_stops_callbacks() {
        let fx = Fixture::new();
        fx.group.add_action(ACTION, value(false, 50, 0)).unwrap();
        let mut tracker = fx.attach().unwrap();

        tracker.detach();
        let after_detach = fx.changes.get();

        fx.group
            .change_action_state(ACTION, value(false, 10, 0))
            .unwrap();
        fx.group.remove_action(ACTION).unwrap();
        fx.group.add_action(ACTION, value(true, 90, 0)).unwrap();

        assert_eq!(fx.changes.get(), after_detach);
    }

    #[test]
    fn detach_is_idempotent() {
        let fx = Fixture::new();
        let mut tracker = fx.attach().unwrap();
        tracker.detach();
        tracker.detach();
    }

    #[test]
    fn detach_after_source_closed_is_swallowed() {
        let fx = Fixture::new();
        let mut tracker = fx.attach().unwrap();

        fx.group.close();
        // The source refuses the disconnects; detach must not surface that.
        tracker.detach();
    }

    #[test]
    fn drop_detaches() {
        let fx = Fixture::new();
        fx.group.add_action(ACTION, value(false, 50, 0)).unwrap();
        {
            let _tracker = fx.attach().unwrap();
        }
        let after_drop = fx.changes.get();

        fx.group
            .change_action_state(ACTION, value(false, 40, 0))
            .unwrap();
        assert_eq!(fx.changes.get(), after_drop);
    }

    #[test]
    fn tracks_configured_action_name() {
        let fx = Fixture::new();
        let tracker = fx.attach().unwrap();
        assert_eq!(tracker.action_name(), ACTION);
    }
}
