// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::Arc;

use super::map::ContextualDataMap;
use super::resolve::{Ambient, ResolveContext};
use crate::context::Context;
use crate::error::ContextualDataError;

/// Contextual data operations against the context picked by `R`.
///
/// `ContextualData::ambient()` works on whatever context is current on the
/// calling thread, which is what the free functions in
/// [`contextual_data`](crate::contextual_data) use.  `ContextualData::new(ctx)`
/// works on an explicit handle instead:
///
/// ```rust
/// use contextual_logging::context::Context;
/// use contextual_logging::contextual_data::ContextualData;
///
/// let ctx = Context::new("request".to_string());
/// let data = ContextualData::new(ctx.clone());
/// data.put("tenant", "acme");
///
/// // Visible through the ambient store once the context is entered.
/// let _guard = ctx.enter();
/// assert_eq!(ContextualData::ambient().get("tenant").as_deref(), Some("acme"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextualData<R = Ambient> {
    resolver: R,
}

impl ContextualData<Ambient> {
    pub const fn ambient() -> Self {
        Self { resolver: Ambient }
    }
}

impl<R: ResolveContext> ContextualData<R> {
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Stores `value` under `key` in the resolved context's data.
    ///
    /// Any string is a valid key or value, the empty string included.  Without
    /// a context this does nothing, apart from a trace-level diagnostic when
    /// tracing is enabled.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.resolver.resolve_context() {
            Some(context) => data_map(&context).insert(key, value),
            None => crate::trace_sync!(
                "Attempt to set contextual data `{key}` outside of any execution context"
            ),
        }
    }

    /// Returns the value under `key`, or `None` when the key is absent or
    /// there is no context.
    pub fn get(&self, key: &str) -> Option<String> {
        self.resolver
            .resolve_context()
            .and_then(|context| existing_data_map(&context))
            .and_then(|map| map.get(key))
    }

    /// Returns the value under `key`, or `default` when the key is absent or
    /// there is no context.
    pub fn get_or_default(&self, key: &str, default: impl Into<String>) -> String {
        self.get(key).unwrap_or_else(|| default.into())
    }

    /// [`put`](Self::put) for callers whose key or value may be missing.
    ///
    /// # Errors
    ///
    /// [`ContextualDataError::InvalidArgument`] when `key` or `value` is
    /// `None`.  Nothing is looked up or stored in that case.
    pub fn try_put(
        &self,
        key: Option<&str>,
        value: Option<&str>,
    ) -> Result<(), ContextualDataError> {
        let key = key.ok_or(ContextualDataError::missing("key"))?;
        let value = value.ok_or(ContextualDataError::missing("value"))?;
        self.put(key, value);
        Ok(())
    }

    /// [`get`](Self::get) for callers whose key may be missing.
    ///
    /// # Errors
    ///
    /// [`ContextualDataError::InvalidArgument`] when `key` is `None`.
    pub fn try_get(&self, key: Option<&str>) -> Result<Option<String>, ContextualDataError> {
        let key = key.ok_or(ContextualDataError::missing("key"))?;
        Ok(self.get(key))
    }

    /// [`get_or_default`](Self::get_or_default) for callers whose key may be
    /// missing.
    ///
    /// # Errors
    ///
    /// [`ContextualDataError::InvalidArgument`] when `key` is `None`.
    pub fn try_get_or_default(
        &self,
        key: Option<&str>,
        default: impl Into<String>,
    ) -> Result<String, ContextualDataError> {
        let key = key.ok_or(ContextualDataError::missing("key"))?;
        Ok(self.get_or_default(key, default))
    }

    /// Returns a copy of every entry.
    ///
    /// `None` means there is no context; a context without any data yields an
    /// empty map.  The copy is detached from the store.
    pub fn get_all(&self) -> Option<HashMap<String, String>> {
        let context = self.resolver.resolve_context()?;
        Some(
            existing_data_map(&context)
                .map(|map| map.snapshot())
                .unwrap_or_default(),
        )
    }
}

/// Returns `context`'s map, attaching an empty one on first use.
pub(crate) fn data_map(context: &Context) -> Arc<ContextualDataMap> {
    context.local_or_insert_with(ContextualDataMap::default)
}

/// Returns `context`'s map without creating it.
fn existing_data_map(context: &Context) -> Option<Arc<ContextualDataMap>> {
    context.local::<ContextualDataMap>()
}
