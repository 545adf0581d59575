// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contextual data: key/value pairs that travel with an execution context.
//!
//! Data put while a [`Context`](crate::context::Context) is current is visible
//! to every later read under that same context, on any thread, and is rendered
//! into every log line emitted under it (see [`pattern`](crate::pattern)).
//! The map backing a context is created on the first `put` and dropped with
//! the context.
//!
//! # Outside of a context
//!
//! Calling these functions on a thread with no current context is not an
//! error:
//!
//! | Operation | Result |
//! |---|---|
//! | [`put`] | nothing happens |
//! | [`get`] | `None` |
//! | [`get_or_default`] | the default |
//! | [`get_all`] | `None` (a context with no data gives an empty map instead) |
//!
//! # Example
//!
//! ```rust
//! use contextual_logging::context::Context;
//! use contextual_logging::contextual_data;
//!
//! let ctx = Context::new("request".to_string());
//! ctx.scope(|| {
//!     contextual_data::put("requestId", "abc123");
//!     assert_eq!(contextual_data::get("requestId").as_deref(), Some("abc123"));
//!     assert_eq!(contextual_data::get_or_default("missing", "n/a"), "n/a");
//!     assert_eq!(contextual_data::get_all().unwrap().len(), 1);
//! });
//!
//! contextual_data::put("x", "y");
//! assert_eq!(contextual_data::get("x"), None);
//! assert_eq!(contextual_data::get_all(), None);
//! ```
//!
//! # Errors
//!
//! Every string is a valid key or value, the empty string included, so the
//! typed operations cannot fail.  Callers holding a possibly missing key or
//! value (an optional header, a nullable foreign field) use [`try_put`],
//! [`try_get`] and [`try_get_or_default`], which reject `None` with
//! [`ContextualDataError::InvalidArgument`] before any context is looked up.

mod map;
mod resolve;
mod store;


use std::collections::HashMap;

use crate::error::ContextualDataError;

pub use resolve::{Ambient, ResolveContext};
pub use store::ContextualData;

/// Puts `value` under `key` in the current context's data.
#[inline]
pub fn put(key: impl Into<String>, value: impl Into<String>) {
    ContextualData::ambient().put(key, value)
}

/// Gets the value under `key` from the current context's data.
#[inline]
pub fn get(key: &str) -> Option<String> {
    ContextualData::ambient().get(key)
}

/// Gets the value under `key` from the current context's data, or `default`.
#[inline]
pub fn get_or_default(key: &str, default: impl Into<String>) -> String {
    ContextualData::ambient().get_or_default(key, default)
}

/// [`put`] with a key or value that may be missing.
#[inline]
pub fn try_put(key: Option<&str>, value: Option<&str>) -> Result<(), ContextualDataError> {
    ContextualData::ambient().try_put(key, value)
}

/// [`get`] with a key that may be missing.
#[inline]
pub fn try_get(key: Option<&str>) -> Result<Option<String>, ContextualDataError> {
    ContextualData::ambient().try_get(key)
}

/// [`get_or_default`] with a key that may be missing.
#[inline]
pub fn try_get_or_default(
    key: Option<&str>,
    default: impl Into<String>,
) -> Result<String, ContextualDataError> {
    ContextualData::ambient().try_get_or_default(key, default)
}

/// Copies the current context's data, or `None` outside of a context.
#[inline]
pub fn get_all() -> Option<HashMap<String, String>> {
    ContextualData::ambient().get_all()
}
