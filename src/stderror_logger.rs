// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use crate::logger::Logger;

/**
A reference logger that logs to stderr (the browser console on wasm32).
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StdErrorLogger {}

impl StdErrorLogger {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Logger for StdErrorLogger {
    fn finish_log_record(&self, record: LogRecord) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let mut lock = std::io::stderr().lock();
            // Nowhere left to report a failed write to stderr.
            for part in record.parts {
                let _ = lock.write_all(part.as_bytes());
            }
            let _ = lock.write_all(b"\n");
        }
        #[cfg(target_arch = "wasm32")]
        {
            use crate::Level;
            let level = record.level();
            let msg = record.parts.join("");
            match level {
                Level::Trace => web_sys::console::trace_1(&msg.into()),
                Level::DebugInternal => web_sys::console::debug_1(&msg.into()),
                Level::Info => web_sys::console::info_1(&msg.into()),
                Level::Warning => web_sys::console::warn_1(&msg.into()),
                Level::Error => web_sys::console::error_1(&msg.into()),
            }
        }
    }

    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + 's>> {
        Box::pin(async move {
            //todo: this locks, which is maybe not what we want?
            self.finish_log_record(record)
        })
    }

    fn prepare_to_die(&self) {
        //nothing to do since we are unbuffered
    }
}
