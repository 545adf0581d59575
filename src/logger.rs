//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use std::fmt::Debug;

/// A destination for finished log records.
///
/// Records arrive already enriched with the contextual data of the context
/// that produced them, so loggers never need to consult a context themselves.
pub trait Logger: Debug + Send + Sync {
    /**
        Submits the log record for logging.
    */
    fn finish_log_record(&self, record: LogRecord);

    /**
    Submits the log record for logging asynchronously.

    Loggers may choose to implement this as a simple wrapper around [Self::finish_log_record] if they wish.
    */
    fn finish_log_record_async<'s>(
        &'s self,
        record: LogRecord,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + 's>>;

    /**
    The application may imminently exit.  Ensure all buffers are flushed and up to date.
    */
    fn prepare_to_die(&self);
}

/*
Boilerplate notes.

Clone, PartialEq, Hash and Default are not required: loggers often own unique
resources (a file, a socket) and equality between them is ill-defined.
Send/Sync are required since records are submitted from any worker thread.
*/
