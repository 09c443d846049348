//! Reference-counted heap wrapper for `Expr`'s composite variants.
//!
//! `Expr` is immutable and cloned constantly (every rewrite step passes
//! expressions by value); `Heap<T>` makes that cheap by sharing the backing
//! allocation instead of deep-copying it, the same role the teacher's
//! `ori_patterns::value::Heap` plays for `Value`. We use `Rc`, not `Arc`:
//! a `Context` and the expressions it produces never leave one thread.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Shared immutable heap allocation.
///
/// The inner `Rc::new` is private; the only way to build one is
/// `Heap::new`, so every heap-backed `Expr` variant goes through the same
/// construction path.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }

    /// Reclaim the inner value without cloning, if this is the only handle.
    pub fn try_into_inner(self) -> Result<T, Self> {
        Rc::try_unwrap(self.0).map_err(Heap)
    }

    /// True if `a` and `b` point at the same allocation.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<T: fmt::Display + ?Sized> fmt::Display for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl<T: ?Sized> AsRef<T> for Heap<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq + ?Sized> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl<T: Eq + ?Sized> Eq for Heap<T> {}

impl<T: std::hash::Hash + ?Sized> std::hash::Hash for Heap<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (*self.0).hash(state);
    }
}
