// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record dispatch.
//!
//! The logging macros expand to three steps:
//! 1. [`pre`] creates a [`LogRecord`] carrying the context prelude and the
//!    current context's contextual data, rendered through the global pattern
//! 2. the macro appends the formatted message
//! 3. [`sync_post`] or [`async_post`] hands the record to every global logger
//!
//! Nothing here requires a current context: outside of one the prelude is a
//! `-` and the pattern renders its defaults.

use crate::Level;
use crate::context::Context;
use crate::contextual_data::ContextualData;
use crate::log_record::LogRecord;

/// Creates a record for a message at `level` emitted from `file:line:column`.
///
/// ```rust
/// # use contextual_logging::Level;
/// # use contextual_logging::hidden::{pre, sync_post};
/// let mut record = pre(Level::Warning, file!(), line!(), column!());
/// record.log("disk almost full");
/// sync_post(record);
/// ```
pub fn pre(level: Level, file: &'static str, line: u32, column: u32) -> LogRecord {
    let mut record = LogRecord::new(level);

    let context = Context::current();
    match &context {
        Some(context) => context._log_prelude(&mut record),
        None => record.log(" - "),
    }

    let data = ContextualData::new(context.as_ref()).get_all();
    let rendered = crate::global_config::global_pattern().render(data.as_ref());
    if !rendered.is_empty() {
        record.log_owned(rendered);
        record.log(" ");
    }

    record.log(level.tag());

    //file, line
    record.log(file);
    record.log_owned(format!(":{}:{} ", line, column));

    record.log_timestamp();
    record
}

/// Sends a finished record to every global logger.
pub fn sync_post(record: LogRecord) {
    for logger in crate::global_logger::global_loggers() {
        logger.finish_log_record(record.clone());
    }
}

/// Sends a finished record to every global logger, asynchronously.
pub async fn async_post(record: LogRecord) {
    for logger in crate::global_logger::global_loggers() {
        logger.finish_log_record_async(record.clone()).await;
    }
}
