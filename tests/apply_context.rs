//SPDX-License-Identifier: MIT OR Apache-2.0

use contextual_logging::context::{ApplyContext, Context};
use contextual_logging::contextual_data;
use contextual_logging::{InMemoryLogger, global_loggers, set_global_loggers};
use std::future::Future;
use std::pin::Pin;
use parking_lot::Mutex;
use std::sync::Arc;
use std::task::{Poll, Waker};
use test_executors::async_test;

static TEST_LOGGER_GUARD: Mutex<()> = parking_lot::const_mutex(());

/// Returns Pending exactly once.
#[derive(Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut std::task::Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

#[async_test]
async fn context_is_current_while_polled() {
    let ctx = Context::new("apply".to_string());
    let inner_ctx = ctx.clone();
    let seen = ApplyContext::new(ctx, async move {
        contextual_data::put("k", "v");
        YieldOnce::default().await;
        (Context::current() == Some(inner_ctx), contextual_data::get("k"))
    })
    .await;
    assert_eq!(seen, (true, Some("v".to_string())));
}

#[test]
fn context_follows_the_task_across_threads() {
    Context::clear_current();
    let ctx = Context::new("migrating".to_string());
    let mut task = Box::pin(ctx.apply(async {
        contextual_data::put("requestId", "abc123");
        YieldOnce::default().await;
        contextual_data::get("requestId")
    }));

    let mut cx = std::task::Context::from_waker(Waker::noop());
    assert!(task.as_mut().poll(&mut cx).is_pending());
    // nothing leaks onto the polling thread
    assert!(Context::current().is_none());
    assert_eq!(contextual_data::get("requestId"), None);

    let seen = std::thread::spawn(move || test_executors::spin_on(task))
        .join()
        .expect("worker should not panic");
    assert_eq!(seen.as_deref(), Some("abc123"));
}

#[test]
fn prior_context_restored_after_poll() {
    let outer = Context::new("outer".to_string());
    let inner = Context::new("inner".to_string());
    outer.scope(|| {
        let inner_seen = test_executors::spin_on(inner.apply(async { Context::current() }));
        assert_eq!(inner_seen.as_ref(), Some(&inner));
        assert_eq!(Context::current().as_ref(), Some(&outer));
    });
}

#[test]
fn async_macros_are_enriched() {
    let _guard = TEST_LOGGER_GUARD.lock();
    let logger = Arc::new(InMemoryLogger::new());
    let original = global_loggers();
    set_global_loggers(vec![logger.clone()]);

    let ctx = Context::new("async".to_string());
    test_executors::spin_on(ctx.apply(async {
        contextual_data::put("tenant", "acme");
        contextual_logging::info_async!("async hello");
    }));

    set_global_loggers(original);
    let logs = logger.drain_logs();
    let line = logs.lines().find(|l| l.ends_with("async hello")).unwrap();
    assert!(line.contains("tenant=acme INFO: "), "{line}");
}
