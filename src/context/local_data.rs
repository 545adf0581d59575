// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-context auxiliary storage.

use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

type Slot = Arc<dyn Any + Send + Sync>;

/// A table of values attached to one context, one per type.
///
/// The `TypeId` of the stored value is the slot key, so each subsystem owns
/// its slot simply by owning its type.  The table lives exactly as long as the
/// context that holds it.
#[derive(Default)]
pub(crate) struct LocalData {
    slots: Mutex<HashMap<TypeId, Slot>>,
}

impl LocalData {
    pub(crate) fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let slot = self.slots.lock().get(&TypeId::of::<T>()).cloned()?;
        slot.downcast::<T>().ok()
    }

    /// Returns the value in `T`'s slot, installing `f()` first if the slot is empty.
    ///
    /// The table stays locked while `f` runs, so concurrent callers all observe the
    /// single installed value.  `f` must not touch this table.
    pub(crate) fn get_or_insert_with<T, F>(&self, f: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        let mut slots = self.slots.lock();
        let id = TypeId::of::<T>();
        if let Some(existing) = slots.get(&id) {
            if let Ok(value) = Arc::clone(existing).downcast::<T>() {
                return value;
            }
        }
        let value = Arc::new(f());
        slots.insert(id, Arc::clone(&value) as Slot);
        value
    }
}

impl Debug for LocalData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // try_lock: Debug may run from inside get_or_insert_with's initializer
        match self.slots.try_lock() {
            Some(slots) => f.debug_struct("LocalData").field("slots", &slots.len()).finish(),
            None => f.debug_struct("LocalData").finish_non_exhaustive(),
        }
    }
}
