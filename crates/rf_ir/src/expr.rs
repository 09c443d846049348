//! The expression tree.
//!
//! `Expr` is the one type every later subsystem (matcher, rule store,
//! evaluator) consumes and produces. It is immutable: every transformation
//! in this crate and in `rf_eval` builds a new `Expr` rather than mutating
//! one in place. Composite variants share their backing allocation through
//! `Heap` so that rewriting a large tree doesn't deep-copy untouched
//! subtrees (the same "no `Box<Expr>` in the hot path, share instead"
//! design the teacher's IR documents, adapted from arena indices to `Rc`
//! since our trees are built and discarded continuously at runtime rather
//! than fixed once by a parser).

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::heap::Heap;
use crate::name::{Name, StringLookup};

/// An association entry: the pair plus its insertion order, so
/// `Association` can offer O(1) key lookup while still preserving
/// insertion order for `Keys`/`Values`/display.
#[derive(Clone, Debug)]
pub struct AssocData {
    /// Key/value pairs in insertion order. A replacing assignment updates
    /// the value in place rather than appending.
    pub pairs: Vec<(Expr, Expr)>,
}

impl AssocData {
    pub fn new(pairs: Vec<(Expr, Expr)>) -> Self {
        let mut data = AssocData { pairs: Vec::new() };
        for (k, v) in pairs {
            data.insert(k, v);
        }
        data
    }

    /// Insert or replace, preserving the original position on replace.
    pub fn insert(&mut self, key: Expr, value: Expr) {
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| k.equals(&key)) {
            slot.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    pub fn get(&self, key: &Expr) -> Option<&Expr> {
        self.pairs.iter().find(|(k, _)| k.equals(key)).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PartialEq for AssocData {
    fn eq(&self, other: &Self) -> bool {
        self.pairs.len() == other.pairs.len()
            && self
                .pairs
                .iter()
                .zip(other.pairs.iter())
                .all(|((k1, v1), (k2, v2))| k1.equals(k2) && v1.equals(v2))
    }
}

impl Eq for AssocData {}

impl Hash for AssocData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pairs.len().hash(state);
        for (k, v) in &self.pairs {
            k.hash(state);
            v.hash(state);
        }
    }
}

/// An `Error` value's payload. Errors are ordinary expressions;
/// there is no separate exception mechanism inside the core.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorData {
    pub kind: Name,
    pub message: Heap<String>,
    pub captured_args: Heap<Vec<Expr>>,
}

/// The expression tree.
///
/// `Clone` is cheap: atoms are `Copy`-sized, composites share their `Heap`
/// allocation.
#[derive(Clone, Debug)]
pub enum Expr {
    Integer(i64),
    /// Stored as `f64`; hashed/compared via bit pattern so `Expr` can be a
    /// `HashMap`/`HashSet` key (needed for `Association`'s lookup index).
    Real(f64),
    Str(Heap<String>),
    Bool(bool),
    Symbol(Name),
    /// `head` is boxed-by-sharing rather than restricted to `Symbol`
    /// because Function application and curried calls use a non-Symbol
    /// head.
    Compound {
        head: Heap<Expr>,
        args: Heap<Vec<Expr>>,
    },
    ByteArray(Heap<Vec<u8>>),
    Association(Heap<AssocData>),
    Error(Heap<ErrorData>),
}

impl Expr {
    // Constructors

    pub fn integer(n: i64) -> Self {
        Expr::Integer(n)
    }

    pub fn real(n: f64) -> Self {
        Expr::Real(n)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::Str(Heap::new(s.into()))
    }

    pub fn boolean(b: bool) -> Self {
        Expr::Bool(b)
    }

    pub fn symbol(name: Name) -> Self {
        Expr::Symbol(name)
    }

    pub fn compound(head: Expr, args: Vec<Expr>) -> Self {
        Expr::Compound {
            head: Heap::new(head),
            args: Heap::new(args),
        }
    }

    /// Build `head(args...)` where `head` is a bare symbol — the common
    /// case, used throughout the kernel and special forms.
    pub fn call(head: Name, args: Vec<Expr>) -> Self {
        Expr::compound(Expr::Symbol(head), args)
    }

    pub fn byte_array(bytes: Vec<u8>) -> Self {
        Expr::ByteArray(Heap::new(bytes))
    }

    pub fn association(pairs: Vec<(Expr, Expr)>) -> Self {
        Expr::Association(Heap::new(AssocData::new(pairs)))
    }

    pub fn error(kind: Name, message: impl Into<String>, captured_args: Vec<Expr>) -> Self {
        Expr::Error(Heap::new(ErrorData {
            kind,
            message: Heap::new(message.into()),
            captured_args: Heap::new(captured_args),
        }))
    }

    // Introspection

    pub fn is_error(&self) -> bool {
        matches!(self, Expr::Error(_))
    }

    pub fn as_compound(&self) -> Option<(&Expr, &[Expr])> {
        match self {
            Expr::Compound { head, args } => Some((head, args)),
            _ => None,
        }
    }

    /// The head expression: atoms are their own head-less leaves, so this
    /// only returns `Some` for compounds. Callers needing "the symbol
    /// naming this expression" should use `head_classifier` instead.
    pub fn head(&self) -> Option<&Expr> {
        self.as_compound().map(|(h, _)| h)
    }

    pub fn args(&self) -> &[Expr] {
        self.as_compound().map_or(&[], |(_, a)| a)
    }

    /// True if this is a compound with the given symbol head.
    pub fn has_head(&self, name: Name) -> bool {
        matches!(self.head(), Some(Expr::Symbol(s)) if *s == name)
    }

    /// `Length`: arg count for compounds, pair count for
    /// associations, 0 for every other atom.
    pub fn length(&self) -> i64 {
        match self {
            Expr::Compound { args, .. } => args.len() as i64,
            Expr::Association(data) => data.len() as i64,
            _ => 0,
        }
    }

    // Structural equality: recursive, variant-sensitive

    pub fn equals(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Integer(a), Expr::Integer(b)) => a == b,
            (Expr::Real(a), Expr::Real(b)) => a.to_bits() == b.to_bits(),
            (Expr::Str(a), Expr::Str(b)) => **a == **b,
            (Expr::Bool(a), Expr::Bool(b)) => a == b,
            (Expr::Symbol(a), Expr::Symbol(b)) => a == b,
            (Expr::ByteArray(a), Expr::ByteArray(b)) => **a == **b,
            (Expr::Association(a), Expr::Association(b)) => **a == **b,
            (Expr::Error(a), Expr::Error(b)) => {
                a.kind == b.kind && *a.message == *b.message
            }
            (
                Expr::Compound { head: h1, args: a1 },
                Expr::Compound { head: h2, args: a2 },
            ) => {
                h1.equals(h2)
                    && a1.len() == a2.len()
                    && a1.iter().zip(a2.iter()).all(|(x, y)| x.equals(y))
            }
            // Integer(n) != Real(n) unless explicitly coerced by a
            // numeric comparison operator.
            _ => false,
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Expr::Integer(n) => n.hash(state),
            Expr::Real(f) => f.to_bits().hash(state),
            Expr::Str(s) => s.hash(state),
            Expr::Bool(b) => b.hash(state),
            Expr::Symbol(n) => n.hash(state),
            Expr::ByteArray(b) => b.hash(state),
            Expr::Association(a) => a.hash(state),
            Expr::Error(e) => e.hash(state),
            Expr::Compound { head, args } => {
                head.hash(state);
                for a in args.iter() {
                    a.hash(state);
                }
            }
        }
    }
}

/// Debug-only compact rendering (not `FullForm`/`InputForm`, see
/// `crate::format`); useful in assertion failure messages.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Integer(n) => write!(f, "{n}"),
            Expr::Real(n) => write!(f, "{n}"),
            Expr::Str(s) => write!(f, "{s:?}"),
            Expr::Bool(b) => write!(f, "{b}"),
            Expr::Symbol(n) => write!(f, "Symbol({})", n.raw()),
            Expr::ByteArray(b) => write!(f, "ByteArray(len={})", b.len()),
            Expr::Association(a) => write!(f, "Association(len={})", a.len()),
            Expr::Error(e) => write!(f, "Error({:?})", e.kind),
            Expr::Compound { head, args } => {
                write!(f, "{head}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Resolve the head-classifier of an expression: the symbol
/// naming its top-level variant, used by `Blank(T)` filters in the
/// matcher.
pub fn head_classifier(expr: &Expr, interner: &impl StringLookup, cache: &ClassifierNames) -> Name {
    match expr {
        Expr::Integer(_) => cache.integer,
        Expr::Real(_) => cache.real,
        Expr::Str(_) => cache.string,
        Expr::Bool(_) => cache.symbol, // Bool is logically a distinguished Symbol
        Expr::Symbol(_) => cache.symbol,
        Expr::ByteArray(_) => cache.byte_array,
        Expr::Association(_) => cache.association,
        Expr::Error(_) => cache.error,
        Expr::Compound { head, .. } => match &**head {
            Expr::Symbol(s) => *s,
            other => head_classifier(other, interner, cache),
        },
    }
}

/// Interned names for the fixed set of classifier keywords, computed once
/// per `Context` so `head_classifier` never has to intern on the hot path.
#[derive(Clone, Copy)]
pub struct ClassifierNames {
    pub integer: Name,
    pub real: Name,
    pub string: Name,
    pub symbol: Name,
    pub list: Name,
    pub association: Name,
    pub byte_array: Name,
    pub number: Name,
    pub error: Name,
}

impl ClassifierNames {
    pub fn new(interner: &crate::name::StringInterner) -> Self {
        ClassifierNames {
            integer: interner.intern("Integer"),
            real: interner.intern("Real"),
            string: interner.intern("String"),
            symbol: interner.intern("Symbol"),
            list: interner.intern("List"),
            association: interner.intern("Association"),
            byte_array: interner.intern("ByteArray"),
            number: interner.intern("Number"),
            error: interner.intern("Error"),
        }
    }
}
