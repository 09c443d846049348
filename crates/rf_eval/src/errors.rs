//! Centralized `Expr::Error` construction, grouped by kind.
//!
//! Every place in the evaluator that needs to fail constructs its error
//! through one of these functions rather than calling `Expr::error`
//! directly, so the full set of kinds stays discoverable in one place and
//! each message is phrased consistently.

use rf_ir::{Expr, Name, StringInterner};

/// Rust-level plumbing failures — not user-visible `Expr::Error` values,
/// but invariant violations inside the evaluator itself (a name interned
/// by a different interner, an arena-style lookup miss). These are
/// converted to `InternalError` at the evaluator boundary; the public
/// `evaluate` surface never panics on malformed-but-well-typed input.
#[derive(Debug, thiserror::Error)]
pub enum InternalFault {
    #[error("symbol table has no entry for interned name {0:?}")]
    UnknownSymbol(Name),
    #[error("scope stack underflow while restoring bindings")]
    ScopeUnderflow,
}

#[cold]
pub fn argument_error(interner: &StringInterner, message: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::error(interner.intern("ArgumentError"), message, args)
}

#[cold]
pub fn part_error(interner: &StringInterner, message: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::error(interner.intern("PartError"), message, args)
}

#[cold]
pub fn division_by_zero(interner: &StringInterner, args: Vec<Expr>) -> Expr {
    Expr::error(interner.intern("DivisionByZero"), "division by zero", args)
}

#[cold]
pub fn mathematical_error(interner: &StringInterner, message: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::error(interner.intern("MathematicalError"), message, args)
}

#[cold]
pub fn type_error(interner: &StringInterner, message: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::error(interner.intern("TypeError"), message, args)
}

#[cold]
pub fn protected(interner: &StringInterner, symbol_name: &str) -> Expr {
    Expr::error(
        interner.intern("Protected"),
        format!("{symbol_name} is Protected"),
        vec![],
    )
}

#[cold]
pub fn unknown_attribute(interner: &StringInterner, name: &str) -> Expr {
    Expr::error(
        interner.intern("UnknownAttribute"),
        format!("unknown attribute {name}"),
        vec![],
    )
}

#[cold]
pub fn recursion_error(interner: &StringInterner, limit: usize) -> Expr {
    Expr::error(
        interner.intern("RecursionError"),
        format!("recursion depth exceeded {limit}"),
        vec![],
    )
}

#[cold]
pub fn not_implemented(interner: &StringInterner, what: &str) -> Expr {
    Expr::error(interner.intern("NotImplemented"), what.to_string(), vec![])
}

#[cold]
pub fn assertion_failed(interner: &StringInterner, args: Vec<Expr>) -> Expr {
    Expr::error(interner.intern("AssertionFailed"), "assertion failed", args)
}

#[cold]
pub fn internal_error(interner: &StringInterner, fault: &InternalFault) -> Expr {
    Expr::error(interner.intern("InternalError"), fault.to_string(), vec![])
}
