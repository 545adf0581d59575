// SPDX-License-Identifier: MIT OR Apache-2.0

/// Severity of a log record.
///
/// Levels are ordered; [`set_global_level`](crate::global_config::set_global_level)
/// dispatches every record at or above the configured level.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Detailed diagnostics.  Enabled globally or per-context via [`Context::begin_trace`](crate::context::Context::begin_trace).
    Trace,
    /// print-style debugging inside the crate
    DebugInternal,
    /// Supporting downstream crates
    Info,
    /// Suspicious condition
    Warning,
    /// Runtime error
    Error,
}

impl Level {
    /// The tag written into each record, e.g. `INFO: `.
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Level::Trace => "TRACE: ",
            Level::DebugInternal => "DEBUG: ",
            Level::Info => "INFO: ",
            Level::Warning => "WARN: ",
            Level::Error => "ERROR: ",
        }
    }
}
