//! Per-thread "current context" for multi-window applications.
//!
//! Each window owns a [`Context`]; the one being built is made current so
//! helper code deep in the application can reach it without threading a
//! reference through every call.

use std::cell::RefCell;
use std::rc::Rc;

use crate::context::Context;

/// Shared, single-threaded handle to a [`Context`].
#[derive(Clone)]
pub struct ContextHandle(Rc<RefCell<Context>>);

impl ContextHandle {
    pub fn new(cx: Context) -> Self {
        Self(Rc::new(RefCell::new(cx)))
    }

    /// Runs `f` with exclusive access. Returns `None` if the context is
    /// already borrowed further up the stack.
    pub fn with<R>(&self, f: impl FnOnce(&mut Context) -> R) -> Option<R> {
        let mut cx = self.0.try_borrow_mut().ok()?;
        Some(f(&mut cx))
    }

    pub fn ptr_eq(&self, other: &ContextHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

thread_local! {
    static CURRENT: RefCell<Option<ContextHandle>> = const { RefCell::new(None) };
}

/// Makes `handle` the current context of this thread, returning the previous one.
pub fn make_current(handle: &ContextHandle) -> Option<ContextHandle> {
    CURRENT.with(|c| c.replace(Some(handle.clone())))
}

pub fn clear_current() -> Option<ContextHandle> {
    CURRENT.with(|c| c.take())
}

pub fn current_is_set() -> bool {
    CURRENT.with(|c| c.borrow().is_some())
}

/// Runs `f` against the current context. `None` when nothing is current or
/// the current context is already borrowed.
pub fn with_current<R>(f: impl FnOnce(&mut Context) -> R) -> Option<R> {
    let handle = CURRENT.with(|c| c.borrow().clone())?;
    let out = handle.with(f);
    if out.is_none() {
        log::warn!("with_current: context already borrowed");
    }
    out
}
