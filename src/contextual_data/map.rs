// SPDX-License-Identifier: MIT OR Apache-2.0

use parking_lot::RwLock;
use std::collections::HashMap;

/// The key/value map attached to one context.
///
/// Lives in the owning context's local storage; there is never more than one
/// per context and nothing else holds a reference to it for longer than a
/// single operation.
#[derive(Debug, Default)]
pub(crate) struct ContextualDataMap {
    entries: RwLock<HashMap<String, String>>,
}

impl ContextualDataMap {
    pub(crate) fn insert(&self, key: String, value: String) {
        self.entries.write().insert(key, value);
    }

    pub(crate) fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    /// Copies the current entries.
    pub(crate) fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().clone()
    }
}
