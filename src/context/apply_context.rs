// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async context preservation.

use std::future::Future;
use std::pin::Pin;
use std::task::Poll;

use super::context_impl::Context;

/// A [`Future`] wrapper that makes a context current while the inner future is polled.
///
/// Multi-threaded executors may poll a task on a different worker each time
/// it wakes up, and thread-local state does not follow it.  `ApplyContext`
/// installs its context around every poll and restores whatever was current
/// on that worker afterwards, so contextual data put by the task is visible to
/// the task no matter where it runs, and never leaks into unrelated tasks.
///
/// # Examples
///
/// ```rust
/// use contextual_logging::context::{ApplyContext, Context};
/// use contextual_logging::contextual_data;
///
/// async fn handle() -> Option<String> {
///     contextual_data::get("requestId")
/// }
///
/// # async fn example() {
/// let ctx = Context::new("request".to_string());
/// ctx.scope(|| contextual_data::put("requestId", "abc123"));
///
/// let id = ApplyContext::new(ctx, handle()).await;
/// assert_eq!(id.as_deref(), Some("abc123"));
/// # }
/// ```
#[derive(Debug)]
pub struct ApplyContext<F> {
    context: Context,
    future: F,
}

impl<F> ApplyContext<F> {
    pub fn new(context: Context, future: F) -> Self {
        Self { context, future }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }
}

impl<F> Future for ApplyContext<F>
where
    F: Future,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut std::task::Context<'_>) -> Poll<Self::Output> {
        // SAFETY: `future` is structurally pinned.  It is never moved out of `self`,
        // and ApplyContext has no Drop impl that could move it.
        let (context, future) = unsafe {
            let this = self.get_unchecked_mut();
            (&this.context, Pin::new_unchecked(&mut this.future))
        };
        let _guard = context.enter();
        future.poll(cx)
    }
}
