//! Action-source abstraction for DropLink device state.
//!
//! A remote device exposes a set of named, stateful actions. This crate
//! defines the consuming side of that contract:
//! - [`ActionGroup`] — presence/state queries plus change subscriptions
//! - [`ActionValue`] — opaque state payload, decoded on demand
//! - [`LocalActionGroup`] — in-memory implementation used by hosts and tests
//!
//! Everything here is single-threaded and synchronous: a mutation on the
//! group runs every registered handler to completion before it returns.

mod group;
mod value;

pub use group::{
    ActionGroup, AddedHandler, DisconnectError, LocalActionGroup, RemovedHandler, SlotId,
    StateHandler,
};
pub use value::{ActionValue, DecodeError};
