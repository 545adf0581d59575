// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::context::Context;

/// Locates the execution context an operation applies to.
///
/// Resolving to `None` means "not running on behalf of any unit of work".
/// Implementations must be cheap and must not fail: they run on every
/// contextual data operation.
pub trait ResolveContext {
    fn resolve_context(&self) -> Option<Context>;
}

/// Resolves the calling thread's current context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ambient;

impl ResolveContext for Ambient {
    #[inline]
    fn resolve_context(&self) -> Option<Context> {
        Context::current()
    }
}

/// An explicit handle resolves to itself.
impl ResolveContext for Context {
    #[inline]
    fn resolve_context(&self) -> Option<Context> {
        Some(self.clone())
    }
}

impl<R: ResolveContext> ResolveContext for Option<R> {
    #[inline]
    fn resolve_context(&self) -> Option<Context> {
        self.as_ref().and_then(ResolveContext::resolve_context)
    }
}

impl<R: ResolveContext + ?Sized> ResolveContext for &R {
    #[inline]
    fn resolve_context(&self) -> Option<Context> {
        (**self).resolve_context()
    }
}
