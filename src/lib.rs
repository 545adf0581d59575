//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# contextual_logging

Contextual data for logging: key/value pairs attached to the unit of work
that is currently executing, and rendered into every log line that unit emits.

# The problem

A request handler knows the request id.  The database helper three calls
down, which logs the slow query, does not.  Threading `request_id` through
every signature just so log lines can carry it is tedious and leaks logging
concerns into every API.  Thread-locals don't work either once the handler is
an async task that migrates between worker threads.

# The approach

An execution [`Context`](context::Context) identifies the unit of work.  It is
installed as *current* on whichever thread is running that work, either with
a scope guard or by wrapping the task's future in
[`ApplyContext`](context::ApplyContext), which re-installs the context on every
poll.  Each context lazily gets its own thread-safe key/value map:

```rust
use contextual_logging::context::Context;
use contextual_logging::contextual_data;

let request = Context::new("request".to_string());
request.scope(|| {
    contextual_data::put("requestId", "abc123");

    // anywhere further down, on any thread running this context:
    assert_eq!(contextual_data::get("requestId").as_deref(), Some("abc123"));
    contextual_logging::info_sync!("handled");  // "... requestId=abc123 INFO: ... handled"
});
```

Code running outside of any context is not an error: writes are ignored and
reads return `None` or the supplied default.  See [`contextual_data`] for the
exact rules.

# Logging

Records flow through the [global loggers](global_logger) (stderr by default).
What each record shows of the contextual data is controlled by a
[`Pattern`](pattern::Pattern) such as `[%vcl{requestId:-none}]`, configured in
[`global_config`].
*/

mod level;
mod logger;
mod stderror_logger;
mod inmemory_logger;
pub mod global_logger;
pub mod global_config;
mod macros;
mod log_record;
mod dispatch;
pub mod context;
pub mod contextual_data;
pub mod pattern;
pub mod error;
mod sys;

pub use level::Level;
pub use logger::Logger;
pub use log_record::LogRecord;
pub use inmemory_logger::InMemoryLogger;
pub use stderror_logger::StdErrorLogger;
pub use global_logger::{add_global_logger, set_global_loggers, global_loggers};
pub use error::{ContextualDataError, PatternError};

#[doc(hidden)]
pub mod hidden {
    pub use crate::dispatch::{pre, sync_post, async_post};
}

#[cfg(test)]
pub(crate) mod test_support {
    /// Serializes tests that swap global loggers or settings.
    pub(crate) static TEST_GLOBALS_GUARD: parking_lot::Mutex<()> = parking_lot::const_mutex(());
}
