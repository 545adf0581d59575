// SPDX-License-Identifier: MIT OR Apache-2.0

//! Execution contexts.
//!
//! A [`Context`] identifies one logical unit of work, such as a request being
//! served.  At most one context is *current* on a thread at a time; code
//! running outside any unit of work simply has no current context.
//!
//! # Installing a context
//!
//! ```rust
//! use contextual_logging::context::Context;
//!
//! let ctx = Context::new("request".to_string());
//!
//! // Until the guard drops
//! let guard = ctx.enter();
//! assert_eq!(Context::current().as_ref(), Some(&ctx));
//! drop(guard);
//!
//! // For the duration of a closure
//! ctx.scope(|| assert!(Context::current().is_some()));
//! assert!(Context::current().is_none());
//! ```
//!
//! # Crossing threads and executors
//!
//! `Context` is `Send + Sync`.  Move a clone to a worker thread and enter it
//! there, or wrap a future in [`ApplyContext`] so each poll runs with the
//! context installed regardless of which worker polls it.
//!
//! ```rust
//! use contextual_logging::context::Context;
//!
//! let ctx = Context::new("fan_out".to_string());
//! let worker_ctx = ctx.clone();
//! std::thread::spawn(move || {
//!     worker_ctx.scope(|| assert!(Context::current().is_some()));
//! })
//! .join()
//! .unwrap();
//! ```
//!
//! # Auxiliary storage
//!
//! Every context carries a table of values keyed by type, attached on first
//! use with [`Context::local_or_insert_with`] and dropped with the context.
//! The [`contextual_data`](crate::contextual_data) store lives in one such slot.

mod apply_context;
mod context_impl;
mod local_data;

#[cfg(test)]
mod tests;

pub use apply_context::ApplyContext;
pub use context_impl::{Context, ContextGuard, ContextID};
