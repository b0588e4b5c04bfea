//! Named stateful actions with change notifications.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::value::{ActionValue, DecodeError};

/// Identifies one registered handler for later disconnection.
pub type SlotId = u64;

/// Handler for "action-added" notifications.
pub type AddedHandler = Box<dyn FnMut(&str) -> Result<(), DecodeError>>;

/// Handler for "action-removed" notifications.
pub type RemovedHandler = Box<dyn FnMut(&str) -> Result<(), DecodeError>>;

/// Handler for "action-state-changed" notifications, carrying the new value.
pub type StateHandler = Box<dyn FnMut(&str, &ActionValue) -> Result<(), DecodeError>>;

/// Errors produced when unregistering a handler.
///
/// These are best-effort failures: the disconnecting party cannot act on
/// them beyond logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisconnectError {
    #[error("action group already closed")]
    Closed,

    #[error("unknown subscription slot {0}")]
    UnknownSlot(SlotId),
}

/// A set of named, stateful actions exposed by a device.
///
/// Handlers registered here are invoked synchronously while the triggering
/// mutation is still on the stack; a `DecodeError` returned by a handler
/// propagates out of that mutation. Handlers receive every action's
/// notifications — filtering by name is the subscriber's job.
pub trait ActionGroup {
    /// Whether an action with this name is currently registered.
    fn has_action(&self, name: &str) -> bool;

    /// The current state value of the named action, if registered.
    fn action_state(&self, name: &str) -> Option<ActionValue>;

    fn connect_action_added(&self, handler: AddedHandler) -> SlotId;

    fn connect_action_removed(&self, handler: RemovedHandler) -> SlotId;

    fn connect_action_state_changed(&self, handler: StateHandler) -> SlotId;

    /// Unregisters a previously connected handler.
    fn disconnect(&self, slot: SlotId) -> Result<(), DisconnectError>;
}

/// Single-threaded in-memory [`ActionGroup`].
///
/// Hosts feed device action updates into this through the mutators
/// ([`add_action`](Self::add_action), [`remove_action`](Self::remove_action),
/// [`change_action_state`](Self::change_action_state)); each mutation
/// updates the registration table first, then runs every matching handler
/// to completion before returning. Clones share the same underlying group.
#[derive(Clone)]
pub struct LocalActionGroup {
    inner: Rc<RefCell<GroupInner>>,
}

struct GroupInner {
    actions: BTreeMap<String, ActionValue>,
    added: Vec<(SlotId, Rc<RefCell<AddedHandler>>)>,
    removed: Vec<(SlotId, Rc<RefCell<RemovedHandler>>)>,
    changed: Vec<(SlotId, Rc<RefCell<StateHandler>>)>,
    next_slot: SlotId,
    closed: bool,
}

impl LocalActionGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(GroupInner {
                actions: BTreeMap::new(),
                added: Vec::new(),
                removed: Vec::new(),
                changed: Vec::new(),
                next_slot: 1,
                closed: false,
            })),
        }
    }

    /// Registers (or refreshes) an action and emits "action-added".
    ///
    /// Re-adding an existing action replaces its state and still emits, so
    /// subscribers that treat "added" as a refresh signal see it.
    pub fn add_action(&self, name: &str, value: ActionValue) -> Result<(), DecodeError> {
        self.inner
            .borrow_mut()
            .actions
            .insert(name.to_owned(), value);
        self.emit_added(name)
    }

    /// Emits "action-added" without registering any state.
    ///
    /// Models a source that announces an action before its state is
    /// queryable; subscribers re-checking presence will find nothing yet.
    pub fn announce_action(&self, name: &str) -> Result<(), DecodeError> {
        self.emit_added(name)
    }

    /// Unregisters an action and emits "action-removed" if it was present.
    pub fn remove_action(&self, name: &str) -> Result<(), DecodeError> {
        let was_present = self.inner.borrow_mut().actions.remove(name).is_some();
        if !was_present {
            return Ok(());
        }
        let handlers = {
            let inner = self.inner.borrow();
            inner
                .removed
                .iter()
                .map(|(_, h)| Rc::clone(h))
                .collect::<Vec<_>>()
        };
        for handler in handlers {
            (*handler.borrow_mut())(name)?;
        }
        Ok(())
    }

    /// Updates an action's state and emits "action-state-changed".
    pub fn change_action_state(&self, name: &str, value: ActionValue) -> Result<(), DecodeError> {
        self.inner
            .borrow_mut()
            .actions
            .insert(name.to_owned(), value.clone());
        let handlers = {
            let inner = self.inner.borrow();
            inner
                .changed
                .iter()
                .map(|(_, h)| Rc::clone(h))
                .collect::<Vec<_>>()
        };
        for handler in handlers {
            (*handler.borrow_mut())(name, &value)?;
        }
        Ok(())
    }

    /// Marks the group gone: drops all actions and handlers. Subsequent
    /// disconnects fail with [`DisconnectError::Closed`].
    pub fn close(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.closed = true;
        inner.actions.clear();
        inner.added.clear();
        inner.removed.clear();
        inner.changed.clear();
    }

    fn emit_added(&self, name: &str) -> Result<(), DecodeError> {
        // Snapshot the handler list so handlers can call back into the
        // group (presence checks, state queries) without re-borrowing.
        let handlers = {
            let inner = self.inner.borrow();
            inner
                .added
                .iter()
                .map(|(_, h)| Rc::clone(h))
                .collect::<Vec<_>>()
        };
        for handler in handlers {
            (*handler.borrow_mut())(name)?;
        }
        Ok(())
    }

    fn next_slot(inner: &mut GroupInner) -> SlotId {
        let slot = inner.next_slot;
        inner.next_slot += 1;
        slot
    }
}

impl Default for LocalActionGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionGroup for LocalActionGroup {
    fn has_action(&self, name: &str) -> bool {
        self.inner.borrow().actions.contains_key(name)
    }

    fn action_state(&self, name: &str) -> Option<ActionValue> {
        self.inner.borrow().actions.get(name).cloned()
    }

    fn connect_action_added(&self, handler: AddedHandler) -> SlotId {
        let mut inner = self.inner.borrow_mut();
        let slot = Self::next_slot(&mut inner);
        inner.added.push((slot, Rc::new(RefCell::new(handler))));
        slot
    }

    fn connect_action_removed(&self, handler: RemovedHandler) -> SlotId {
        let mut inner = self.inner.borrow_mut();
        let slot = Self::next_slot(&mut inner);
        inner.removed.push((slot, Rc::new(RefCell::new(handler))));
        slot
    }

    fn connect_action_state_changed(&self, handler: StateHandler) -> SlotId {
        let mut inner = self.inner.borrow_mut();
        let slot = Self::next_slot(&mut inner);
        inner.changed.push((slot, Rc::new(RefCell::new(handler))));
        slot
    }

    fn disconnect(&self, slot: SlotId) -> Result<(), DisconnectError> {
        let mut inner = self.inner.borrow_mut();
        if inner.closed {
            return Err(DisconnectError::Closed);
        }
        let before = inner.added.len() + inner.removed.len() + inner.changed.len();
        inner.added.retain(|(id, _)| *id != slot);
        inner.removed.retain(|(id, _)| *id != slot);
        inner.changed.retain(|(id, _)| *id != slot);
        let after = inner.added.len() + inner.removed.len() + inner.changed.len();
        if before == after {
            return Err(DisconnectError::UnknownSlot(slot));
        }
        Ok(())
    }
}
