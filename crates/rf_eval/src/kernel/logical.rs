//! `Not`/`Boole` (spec.md §4.4). `And`/`Or` are HoldAll special forms with
//! short-circuit semantics, handled in `special_forms`, not here.

use rf_ir::Expr;

use crate::context::Context;

pub fn not(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [Expr::Bool(b)] = args else { return None };
    Some(Expr::boolean(!b))
}

pub fn boole(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [Expr::Bool(b)] = args else { return None };
    Some(Expr::integer(if *b { 1 } else { 0 }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_flips_a_boolean() {
        let ctx = Context::new();
        assert_eq!(not(&ctx, &[Expr::boolean(true)]), Some(Expr::boolean(false)));
    }

    #[test]
    fn boole_converts_to_zero_or_one() {
        let ctx = Context::new();
        assert_eq!(boole(&ctx, &[Expr::boolean(true)]), Some(Expr::integer(1)));
        assert_eq!(boole(&ctx, &[Expr::boolean(false)]), Some(Expr::integer(0)));
    }
}
