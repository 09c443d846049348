//! Interned symbol names.
//!
//! Symbols are compared and hashed millions of times during evaluation
//! (every dispatch looks up a head symbol's attributes), so names are
//! interned to a 32-bit index rather than compared as strings.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

/// An interned identifier.
///
/// Two `Name`s compare equal iff they were interned from equal strings by
/// the same `StringInterner`. Comparing `Name`s from different interners is
/// a logic error the type system cannot catch; callers thread a single
/// interner through a `Context`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Raw index, for debugging only.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// Single-threaded string interner.
///
/// Strings are leaked to `'static` once, the same way the teacher's
/// sharded interner does, but without the sharding or locking: the
/// evaluator is single-threaded cooperative (no concurrent access is ever
/// possible within one `Context`).
pub struct StringInterner {
    inner: RefCell<InternerState>,
}

struct InternerState {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl StringInterner {
    pub fn new() -> Self {
        StringInterner {
            inner: RefCell::new(InternerState {
                map: FxHashMap::default(),
                strings: Vec::with_capacity(256),
            }),
        }
    }

    /// Intern a string, returning its `Name`. Idempotent.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&idx) = self.inner.borrow().map.get(s) {
            return Name(idx);
        }
        let mut state = self.inner.borrow_mut();
        // Re-check: another caller may have interned it between the borrows above.
        if let Some(&idx) = state.map.get(s) {
            return Name(idx);
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = state.strings.len() as u32;
        state.strings.push(leaked);
        state.map.insert(leaked, idx);
        Name(idx)
    }

    /// Resolve a `Name` back to its text.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    pub fn resolve(&self, name: Name) -> &'static str {
        self.inner.borrow().strings[name.0 as usize]
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Lookup trait so crates that only need to resolve names (not intern new
/// ones) don't have to depend on the concrete interner type.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        self.resolve(name)
    }
}

/// An interner shared by reference across a `Context` and every `Expr` it
/// produces. `Rc`, not `Arc`: contexts never cross threads.
#[derive(Clone)]
pub struct SharedInterner(Rc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Rc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
