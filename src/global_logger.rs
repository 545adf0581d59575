// SPDX-License-Identifier: MIT OR Apache-2.0

//! Global logger management.
//!
//! Every record produced by the logging macros (and by the crate's own
//! diagnostics) is delivered to each logger in this registry.  By default the
//! registry holds a single [`StdErrorLogger`](crate::stderror_logger::StdErrorLogger).
//!
//! ```
//! use contextual_logging::global_logger::{add_global_logger, global_loggers};
//! use contextual_logging::InMemoryLogger;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(InMemoryLogger::new());
//! add_global_logger(logger.clone());
//! assert!(global_loggers().len() >= 2);
//! ```

use crate::logger::Logger;
use crate::stderror_logger::StdErrorLogger;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGERS: OnceLock<RwLock<Vec<Arc<dyn Logger>>>> = OnceLock::new();

fn registry() -> &'static RwLock<Vec<Arc<dyn Logger>>> {
    GLOBAL_LOGGERS.get_or_init(|| RwLock::new(vec![Arc::new(StdErrorLogger::new())]))
}

/// Returns a snapshot of the current global loggers.
///
/// The lock is released before returning, so loggers are free to log
/// (or swap the registry) from inside `finish_log_record`.
pub fn global_loggers() -> Vec<Arc<dyn Logger>> {
    registry().read().clone()
}

/// Appends a logger to the registry.
pub fn add_global_logger(logger: Arc<dyn Logger>) {
    registry().write().push(logger);
}

/// Replaces every global logger.
pub fn set_global_loggers(new_loggers: Vec<Arc<dyn Logger>>) {
    *registry().write() = new_loggers;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_logger::InMemoryLogger;
    use crate::test_support::TEST_GLOBALS_GUARD;

    #[test]
    fn test_add_logger() {
        let _guard = TEST_GLOBALS_GUARD.lock();
        let original = global_loggers();
        set_global_loggers(vec![Arc::new(StdErrorLogger::new())]);
        let initial_count = global_loggers().len();

        add_global_logger(Arc::new(InMemoryLogger::new()));

        assert_eq!(
            global_loggers().len(),
            initial_count + 1,
            "Logger count should increase by 1"
        );
        set_global_loggers(original);
    }

    #[test]
    fn test_set_loggers() {
        let _guard = TEST_GLOBALS_GUARD.lock();
        let original = global_loggers();
        let logger1 = Arc::new(InMemoryLogger::new());
        let logger2 = Arc::new(InMemoryLogger::new());

        set_global_loggers(vec![logger1, logger2]);

        assert_eq!(global_loggers().len(), 2, "Should have exactly 2 loggers");
        set_global_loggers(original);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_thread_safety() {
        use std::thread;

        let _guard = TEST_GLOBALS_GUARD.lock();
        let original = global_loggers();
        set_global_loggers(vec![Arc::new(StdErrorLogger::new())]);

        let logger_clone = Arc::new(InMemoryLogger::new());
        let handle = thread::spawn(move || {
            add_global_logger(logger_clone);
        });
        let _ = global_loggers();
        handle.join().expect("Thread should complete successfully");

        assert_eq!(global_loggers().len(), 2);
        set_global_loggers(original);
    }
}
