// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type.
//!
//! A [`LogRecord`] accumulates the parts of one log line: the context prelude,
//! the rendered contextual data, the level tag, the call site and finally the
//! message.  Parts are stored separately and only joined on output.
//!
//! ```rust
//! use contextual_logging::{LogRecord, Level};
//!
//! let mut record = LogRecord::new(Level::Info);
//! record.log("Processing request ");
//! record.log_owned(format!("#{}", 42));
//! assert_eq!(record.to_string(), "Processing request #42");
//! ```

use crate::Level;
use std::fmt::Display;
use std::sync::OnceLock;

static INITIAL_TIMESTAMP: OnceLock<crate::sys::Instant> = OnceLock::new();

fn initial_timestamp() -> crate::sys::Instant {
    *INITIAL_TIMESTAMP.get_or_init(crate::sys::Instant::now)
}

/**
A log record.

1.  Create a new [LogRecord].
2.  Progressively write to the [LogRecord].
3.  Finish the [LogRecord] and submit it to a [crate::Logger].
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    pub(crate) parts: Vec<String>,
    level: Level,
}

impl LogRecord {
    pub fn new(level: Level) -> Self {
        Self {
            parts: Vec::new(),
            level,
        }
    }

    /**
    Append the message to the record.
    */
    pub fn log(&mut self, message: &str) {
        self.parts.push(message.to_string());
    }

    /**
    Append the message to the record, taking ownership of the message.
    */
    pub fn log_owned(&mut self, message: String) {
        self.parts.push(message);
    }

    /**
    Log the time elapsed since the first record of the process, followed by a space.
    */
    pub fn log_timestamp(&mut self) -> crate::sys::Instant {
        let time = crate::sys::Instant::now();
        let duration = time.duration_since(initial_timestamp());
        self.log_owned(format!("[{:?}] ", duration));
        time
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for part in &self.parts {
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/*
Boilerplate notes for LogRecord:

- Clone: records are fanned out to every global logger
- PartialEq/Eq/Hash: derived, records compare by content
- Default: Info level, no parts
- Copy, Ord: not meaningful for an owned, unordered buffer
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn parts_join_in_order() {
        let mut record = LogRecord::new(Level::Warning);
        record.log("a");
        record.log_owned("b".to_string());
        record.log("c");
        assert_eq!(record.to_string(), "abc");
        assert_eq!(record.level(), Level::Warning);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn timestamp_is_bracketed() {
        let mut record = LogRecord::default();
        record.log_timestamp();
        let text = record.to_string();
        assert!(text.starts_with('['), "{text}");
        assert!(text.ends_with("] "), "{text}");
    }
}
