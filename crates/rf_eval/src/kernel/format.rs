//! `FullForm`/`InputForm` textual rendering and `Head` (spec.md §4.4),
//! thin wrappers over `rf_ir::format`/`rf_ir::expr::head_classifier`.

use rf_ir::expr::head_classifier;
use rf_ir::Expr;

use crate::context::Context;

pub fn full_form(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::string(rf_ir::format::full_form(a, &*ctx.interner)))
}

pub fn input_form(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    Some(Expr::string(rf_ir::format::input_form(a, &*ctx.interner)))
}

pub fn head(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    match a {
        Expr::Compound { head, .. } => Some((**head).clone()),
        _ => {
            let name = head_classifier(a, &*ctx.interner, &ctx.classifiers);
            Some(Expr::Symbol(name))
        }
    }
}
