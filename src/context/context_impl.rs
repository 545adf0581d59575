// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core Context implementation.

use std::any::Any;
use std::cell::RefCell;
use std::fmt::Display;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::apply_context::ApplyContext;
use super::local_data::LocalData;

static CONTEXT_ID: AtomicU64 = AtomicU64::new(0);
static GUARD_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identifier for a context.
///
/// IDs are process-unique and appear in the prelude of every log line emitted
/// while the context is current.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContextID(pub(crate) u64);

impl Display for ContextID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub(crate) struct ContextInner {
    pub(crate) parent: Option<Context>,
    pub(crate) context_id: u64,
    pub(crate) label: String,
    pub(crate) is_tracing: AtomicBool,
    pub(crate) local_data: LocalData,
}

/// Handle to one logical unit of work.
///
/// A `Context` is cheap to clone (Arc-based) and can be sent to any thread.
/// Clones refer to the same context: equality and hashing are by identity.
///
/// Each thread has at most one *current* context.  Code that runs on behalf of
/// a unit of work installs its context with [`enter`](Context::enter),
/// [`scope`](Context::scope) or, for futures that may be polled on any worker,
/// [`ApplyContext`].  Everything attached to the context, such as its
/// contextual data, is dropped together with the last clone.
///
/// # Examples
///
/// ```rust
/// use contextual_logging::context::Context;
///
/// let request = Context::new("request".to_string());
/// assert!(Context::current().is_none());
/// {
///     let _guard = request.enter();
///     assert_eq!(Context::current(), Some(request.clone()));
/// }
/// assert!(Context::current().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    pub(crate) inner: Arc<ContextInner>,
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Context {}

impl Hash for Context {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} ({})",
            "  ".repeat(self.nesting_level()),
            self.context_id(),
            self.inner.label
        )
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Context>> = const { RefCell::new(None) };
    static ENTERED: RefCell<Vec<Entered>> = const { RefCell::new(Vec::new()) };
}

/// One live [`ContextGuard`] on this thread, oldest first.
#[derive(Debug)]
struct Entered {
    guard: u64,
    prior: Option<Context>,
}

/// Installs `new` as the thread's current context and returns the prior one.
///
/// The prior context is handed back to the caller rather than dropped here, so
/// that whatever its destructor does runs outside the thread-local borrow.
fn replace_current(new: Option<Context>) -> Option<Context> {
    CURRENT
        .try_with(|current| current.replace(new))
        .ok()
        .flatten()
}

impl Context {
    fn with_parent(parent: Option<Context>, label: String) -> Context {
        let is_tracing = parent
            .as_ref()
            .is_some_and(|p| p.inner.is_tracing.load(Ordering::Relaxed));
        Context {
            inner: Arc::new(ContextInner {
                parent,
                context_id: CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
                label,
                is_tracing: AtomicBool::new(is_tracing),
                local_data: LocalData::default(),
            }),
        }
    }

    /// Creates a new root context.
    ///
    /// The context is not installed anywhere; see [`enter`](Context::enter).
    pub fn new(label: String) -> Context {
        Self::with_parent(None, label)
    }

    /// Creates a child of `parent`.
    ///
    /// The child inherits its parent's label and tracing state but has its own
    /// auxiliary storage: contextual data put under the child is not visible
    /// from the parent, and vice versa.
    ///
    /// ```rust
    /// use contextual_logging::context::Context;
    ///
    /// let root = Context::new("root".to_string());
    /// let child = Context::from_parent(root.clone());
    /// assert_eq!(child.nesting_level(), 1);
    /// assert_eq!(child.parent(), Some(&root));
    /// ```
    pub fn from_parent(parent: Context) -> Context {
        let label = parent.inner.label.clone();
        Self::with_parent(Some(parent), label)
    }

    /// Returns the current context for this thread, if any.
    ///
    /// A thread that is not running on behalf of any unit of work has no
    /// context; this is an ordinary outcome, not an error.  Also returns `None`
    /// while the thread's local storage is being torn down.
    #[inline]
    pub fn current() -> Option<Context> {
        CURRENT
            .try_with(|current| current.borrow().clone())
            .ok()
            .flatten()
    }

    /// Makes this context the current one for this thread, with no way back.
    ///
    /// Prefer [`enter`](Context::enter) when the prior context should be restored.
    pub fn set_current(self) {
        drop(replace_current(Some(self)));
    }

    /// Removes the thread's current context, returning it.
    pub fn clear_current() -> Option<Context> {
        replace_current(None)
    }

    /// Installs a fresh root context labelled `label` as this thread's current context.
    pub fn reset(label: String) {
        Context::new(label).set_current();
    }

    /// Installs this context until the returned guard is dropped.
    ///
    /// The guard restores whatever was current before, including "no context".
    /// Guards are tied to the thread that created them and should be dropped
    /// in reverse order of creation; see [`ContextGuard`] for what happens
    /// otherwise.
    pub fn enter(&self) -> ContextGuard {
        let guard = GUARD_ID.fetch_add(1, Ordering::Relaxed);
        let prior = replace_current(Some(self.clone()));
        let _ = ENTERED.try_with(|entered| entered.borrow_mut().push(Entered { guard, prior }));
        ContextGuard {
            guard,
            _not_send: PhantomData,
        }
    }

    /// Runs `f` with this context installed.
    ///
    /// ```rust
    /// use contextual_logging::context::Context;
    ///
    /// let ctx = Context::new("job".to_string());
    /// let label = ctx.scope(|| Context::current().map(|c| c.label().to_string()));
    /// assert_eq!(label.as_deref(), Some("job"));
    /// ```
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.enter();
        f()
    }

    /// Wraps `future` so that this context is current whenever it is polled.
    pub fn apply<F: Future>(&self, future: F) -> ApplyContext<F> {
        ApplyContext::new(self.clone(), future)
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    #[inline]
    pub fn context_id(&self) -> ContextID {
        ContextID(self.inner.context_id)
    }

    pub fn parent(&self) -> Option<&Context> {
        self.inner.parent.as_ref()
    }

    /// Returns the nesting level of this context in the hierarchy.
    ///
    /// Root contexts are at level 0.  Used for log indentation.
    pub fn nesting_level(&self) -> usize {
        let mut level = 0;
        let mut current = self;
        while let Some(parent) = &current.inner.parent {
            level += 1;
            current = parent;
        }
        level
    }

    /// Pops back to the parent of the context with the given ID.
    ///
    /// Searches from the current context up through its ancestors.  When the ID
    /// is found, that context's parent (possibly none) becomes current.  If the
    /// ID is not in the chain, logs a warning and leaves the current context as is.
    ///
    /// ```rust
    /// use contextual_logging::context::Context;
    ///
    /// Context::reset("root".to_string());
    /// let root = Context::current();
    /// let child = Context::from_parent(Context::current().unwrap());
    /// let child_id = child.context_id();
    /// child.set_current();
    ///
    /// Context::pop(child_id);
    /// assert_eq!(Context::current(), root);
    /// ```
    pub fn pop(id: ContextID) {
        let mut current = Context::current();
        while let Some(ctx) = current {
            if ctx.context_id() == id {
                drop(replace_current(ctx.inner.parent.clone()));
                return;
            }
            current = ctx.inner.parent.clone();
        }
        crate::warn_sync!(
            "Tried to pop context with ID {id}, but it was not found in the current context chain."
        );
    }

    #[inline]
    pub fn is_tracing(&self) -> bool {
        self.inner.is_tracing.load(Ordering::Relaxed)
    }

    /// Whether the current context, if any, is tracing.
    #[inline]
    pub fn currently_tracing() -> bool {
        CURRENT
            .try_with(|current| current.borrow().as_ref().is_some_and(Context::is_tracing))
            .unwrap_or(false)
    }

    /// Enables trace records for the current context and children created afterwards.
    ///
    /// Does nothing when no context is current.
    pub fn begin_trace() {
        if let Some(current) = Context::current() {
            current.inner.is_tracing.store(true, Ordering::Relaxed);
            crate::trace_sync!("Begin trace");
        }
    }

    /// Returns the value stored in this context's slot for `T`, if any.
    pub fn local<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.inner.local_data.get::<T>()
    }

    /// Returns this context's value for `T`, attaching `f()` first if there is none.
    ///
    /// Attachment is atomic: when several threads race on an empty slot, exactly
    /// one initializer runs and every caller receives the same `Arc`.  `f` must
    /// not access this context's local storage.
    ///
    /// ```rust
    /// use contextual_logging::context::Context;
    /// use std::sync::Arc;
    ///
    /// #[derive(Default)]
    /// struct Attempts(std::sync::atomic::AtomicU32);
    ///
    /// let ctx = Context::new("retrying".to_string());
    /// let a = ctx.local_or_insert_with(Attempts::default);
    /// let b = ctx.local_or_insert_with(Attempts::default);
    /// assert!(Arc::ptr_eq(&a, &b));
    /// ```
    pub fn local_or_insert_with<T, F>(&self, f: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        self.inner.local_data.get_or_insert_with(f)
    }

    /// Writes the context prelude (tracing marker, indentation, ID) to a log record.
    #[doc(hidden)]
    #[inline]
    pub fn _log_prelude(&self, record: &mut crate::log_record::LogRecord) {
        let prefix = if self.is_tracing() { "T" } else { " " };
        record.log(prefix);
        for _ in 0..self.nesting_level() {
            record.log(" ");
        }
        record.log_owned(format!("{} ", self.context_id()));
    }
}

/// Restores the previously current context when dropped.
///
/// Returned by [`Context::enter`].  Guards nest: the most recently created
/// one should be dropped first.  A guard dropped while a later guard is still
/// alive leaves the current context alone and hands its prior context to the
/// later guard, so once every guard is gone the thread is back to whatever
/// was current before the first one.
///
/// ```rust
/// use contextual_logging::context::Context;
///
/// let (outer, inner) = (Context::new("outer".to_string()), Context::new("inner".to_string()));
/// let a = outer.enter();
/// let b = inner.enter();
/// drop(a);
/// assert_eq!(Context::current(), Some(inner));
/// drop(b);
/// assert_eq!(Context::current(), None);
/// ```
#[must_use = "the context is uninstalled as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ContextGuard {
    guard: u64,
    _not_send: PhantomData<*const ()>,
}

enum Unwind {
    Restore(Option<Context>),
    HandOff(Option<Context>),
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let unwind = ENTERED
            .try_with(|entered| {
                let mut entered = entered.borrow_mut();
                let index = entered.iter().rposition(|e| e.guard == self.guard)?;
                let Entered { prior, .. } = entered.remove(index);
                Some(match entered.get_mut(index) {
                    Some(later) => Unwind::HandOff(std::mem::replace(&mut later.prior, prior)),
                    None => Unwind::Restore(prior),
                })
            })
            .ok()
            .flatten();
        // Contexts are dropped outside the thread-local borrow.
        match unwind {
            Some(Unwind::Restore(prior)) => drop(replace_current(prior)),
            Some(Unwind::HandOff(superseded)) => drop(superseded),
            None => {}
        }
    }
}
