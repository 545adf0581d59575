// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging macros.
//!
//! Each macro takes `format!`-style arguments.  The message is only formatted
//! when the level is enabled (see [`log_enabled`](crate::global_config::log_enabled)),
//! and every record is prefixed with the current context's contextual data.
//!
//! ```rust
//! use contextual_logging::context::Context;
//! use contextual_logging::contextual_data;
//!
//! let ctx = Context::new("request".to_string());
//! ctx.scope(|| {
//!     contextual_data::put("requestId", "abc123");
//!     let items = 3;
//!     // " #0 requestId=abc123 INFO: src/main.rs:9:5 [1.2ms] Handling 3 items"
//!     contextual_logging::info_sync!("Handling {items} items");
//! });
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __log_sync {
    ($level:expr, $($arg:tt)+) => {
        if $crate::global_config::log_enabled($level) {
            let mut record = $crate::hidden::pre($level, file!(), line!(), column!());
            record.log_owned(::std::format!($($arg)+));
            $crate::hidden::sync_post(record);
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_async {
    ($level:expr, $($arg:tt)+) => {
        if $crate::global_config::log_enabled($level) {
            let mut record = $crate::hidden::pre($level, file!(), line!(), column!());
            record.log_owned(::std::format!($($arg)+));
            $crate::hidden::async_post(record).await;
        }
    };
}

/// Detailed diagnostics; enabled by `set_global_level(Level::Trace)` or a tracing context.
#[macro_export]
macro_rules! trace_sync {
    ($($arg:tt)+) => { $crate::__log_sync!($crate::Level::Trace, $($arg)+) };
}

/// print-style debugging.
#[macro_export]
macro_rules! debuginternal_sync {
    ($($arg:tt)+) => { $crate::__log_sync!($crate::Level::DebugInternal, $($arg)+) };
}

#[macro_export]
macro_rules! info_sync {
    ($($arg:tt)+) => { $crate::__log_sync!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! warn_sync {
    ($($arg:tt)+) => { $crate::__log_sync!($crate::Level::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! error_sync {
    ($($arg:tt)+) => { $crate::__log_sync!($crate::Level::Error, $($arg)+) };
}

/// Like [`info_sync!`], but hands the record to loggers asynchronously.  Use inside `async` code.
#[macro_export]
macro_rules! info_async {
    ($($arg:tt)+) => { $crate::__log_async!($crate::Level::Info, $($arg)+) };
}

#[macro_export]
macro_rules! warn_async {
    ($($arg:tt)+) => { $crate::__log_async!($crate::Level::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! error_async {
    ($($arg:tt)+) => { $crate::__log_async!($crate::Level::Error, $($arg)+) };
}
