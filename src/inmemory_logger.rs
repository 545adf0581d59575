// SPDX-License-Identifier: MIT OR Apache-2.0

//! A logger that buffers formatted records in memory.
//!
//! Mostly useful in tests, to assert on the exact lines a piece of code emits:
//!
//! ```
//! use contextual_logging::{InMemoryLogger, Logger, LogRecord, Level};
//!
//! let logger = InMemoryLogger::new();
//! let mut record = LogRecord::new(Level::Info);
//! record.log("hello");
//! logger.finish_log_record(record);
//! assert_eq!(logger.drain_logs(), "hello");
//! assert_eq!(logger.drain_logs(), "");
//! ```

use crate::log_record::LogRecord;
use crate::logger::Logger;
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Default)]
pub struct InMemoryLogger {
    logs: Mutex<Vec<String>>,
}

impl InMemoryLogger {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }

    /// Returns every buffered line joined by `\n` and empties the buffer.
    pub fn drain_logs(&self) -> String {
        let mut logs = self.logs.lock();
        let result = logs.join("\n");
        logs.clear();
        result
    }

    pub fn drain_to_console(&self) {
        let mut logs = self.logs.lock();
        for log in logs.iter() {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::log_1(&log.clone().into());
            #[cfg(not(target_arch = "wasm32"))]
            eprintln!("{}", log);
        }
        logs.clear();
    }
}

impl Logger for InMemoryLogger {
    fn finish_log_record(&self, record: LogRecord) {
        let log_string = record.to_string();
        self.logs.lock().push(log_string);
    }

    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 's>> {
        Box::pin(async move {
            self.finish_log_record(record);
        })
    }

    fn prepare_to_die(&self) {}
}
