//! Type-testing predicates (spec.md §4.4): each takes exactly one argument
//! and never fails to fire — an unrecognized shape is simply `False`, never
//! a symbolic passthrough, since "is this an Integer" is always decidable.

use rf_ir::Expr;

use crate::context::Context;

pub fn integer_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::boolean(matches!(a, Expr::Integer(_))))
}

pub fn float_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::boolean(matches!(a, Expr::Real(_))))
}

pub fn number_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::boolean(matches!(a, Expr::Integer(_) | Expr::Real(_))))
}

pub fn string_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::boolean(matches!(a, Expr::Str(_))))
}

pub fn boolean_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::boolean(matches!(a, Expr::Bool(_))))
}

pub fn symbol_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::boolean(matches!(a, Expr::Symbol(_))))
}

pub fn list_q(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::boolean(a.has_head(ctx.canon.list)))
}

pub fn atom_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::boolean(a.as_compound().is_none()))
}

pub fn true_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::boolean(matches!(a, Expr::Bool(true))))
}

pub fn association_q(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::boolean(matches!(a, Expr::Association(_))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_q_is_true_only_for_integers() {
        let ctx = Context::new();
        assert_eq!(integer_q(&ctx, &[Expr::integer(1)]), Some(Expr::boolean(true)));
        assert_eq!(integer_q(&ctx, &[Expr::real(1.0)]), Some(Expr::boolean(false)));
    }

    #[test]
    fn list_q_checks_the_head_symbol() {
        let ctx = Context::new();
        let list = Expr::call(ctx.canon.list, vec![Expr::integer(1)]);
        assert_eq!(list_q(&ctx, &[list]), Some(Expr::boolean(true)));
        assert_eq!(list_q(&ctx, &[Expr::integer(1)]), Some(Expr::boolean(false)));
    }

    #[test]
    fn atom_q_is_false_for_compounds() {
        let ctx = Context::new();
        let list = Expr::call(ctx.canon.list, vec![]);
        assert_eq!(atom_q(&ctx, &[list]), Some(Expr::boolean(false)));
        assert_eq!(atom_q(&ctx, &[Expr::integer(1)]), Some(Expr::boolean(true)));
    }
}
