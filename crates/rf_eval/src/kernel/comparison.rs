//! `Equal`/`Unequal`/ordering comparisons plus structural `SameQ`/`UnsameQ`
//! (spec.md §4.4). The `Number` extractor coerces `Integer`/`Real` to
//! `f64` so `Equal(3, 3.0)` is `True` even though `SameQ(3, 3.0)` is not.

use std::cmp::Ordering;

use rf_ir::Expr;

use crate::context::Context;

fn as_f64(e: &Expr) -> Option<f64> {
    match e {
        Expr::Integer(n) => Some(*n as f64),
        Expr::Real(n) => Some(*n),
        _ => None,
    }
}

fn numeric_eq(args: &[Expr]) -> Option<bool> {
    let [a, b] = args else { return None };
    match (a, b) {
        (Expr::Integer(_) | Expr::Real(_), Expr::Integer(_) | Expr::Real(_)) => Some(as_f64(a)? == as_f64(b)?),
        (Expr::Str(x), Expr::Str(y)) => Some(**x == **y),
        (Expr::Bool(x), Expr::Bool(y)) => Some(x == y),
        (Expr::Symbol(x), Expr::Symbol(y)) => Some(x == y),
        _ => None,
    }
}

pub fn equal(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    Some(Expr::boolean(numeric_eq(args)?))
}

pub fn unequal(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    Some(Expr::boolean(!numeric_eq(args)?))
}

fn ordering_of(args: &[Expr]) -> Option<Ordering> {
    let [a, b] = args else { return None };
    match (a, b) {
        (Expr::Integer(_) | Expr::Real(_), Expr::Integer(_) | Expr::Real(_)) => as_f64(a)?.partial_cmp(&as_f64(b)?),
        (Expr::Str(x), Expr::Str(y)) => Some(x.as_str().cmp(y.as_str())),
        _ => None,
    }
}

pub fn less(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    Some(Expr::boolean(ordering_of(args)? == Ordering::Less))
}

pub fn greater(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    Some(Expr::boolean(ordering_of(args)? == Ordering::Greater))
}

pub fn less_equal(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    Some(Expr::boolean(ordering_of(args)? != Ordering::Greater))
}

pub fn greater_equal(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    Some(Expr::boolean(ordering_of(args)? != Ordering::Less))
}

pub fn same_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a, b] = args else { return None };
    Some(Expr::boolean(a.equals(b)))
}

pub fn unsame_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a, b] = args else { return None };
    Some(Expr::boolean(!a.equals(b)))
}
