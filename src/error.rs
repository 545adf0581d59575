// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.
//!
//! Running outside of an execution context is never an error; see
//! [`contextual_data`](crate::contextual_data) for the fallback values.  Errors
//! here always indicate a caller bug (a missing key or value passed to one of
//! the `try_*` operations) and are returned before any context is consulted.

use thiserror::Error;

/// Errors returned by the contextual data operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ContextualDataError {
    /// A required argument was unusable.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: &'static str,
    },
}

impl ContextualDataError {
    pub(crate) const fn missing(argument: &'static str) -> Self {
        ContextualDataError::InvalidArgument {
            argument,
            reason: "must not be null",
        }
    }
}

/// Errors returned by [`Pattern::parse`](crate::pattern::Pattern::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// `%vcl{` was opened at `offset` but never closed.
    #[error("unterminated `%vcl{{` at byte {offset}")]
    Unterminated { offset: usize },
    /// `%vcl{}` or `%vcl{:-default}` at `offset`.
    #[error("empty key in `%vcl{{...}}` at byte {offset}")]
    EmptyKey { offset: usize },
}
