//! Substituting a match's bindings into a rule's right-hand side.

use rf_ir::{Expr, Name};
use rf_match::{Binding, Bindings};

use crate::context::Context;

/// Replace every pattern variable in `body` with its bound value.
///
/// `defining_head` is the symbol the rule was installed under (the LHS's
/// head) and `defining_head_is_flat` whether that symbol carries `Flat`.
/// A sequence-bound variable (`y__`) is re-wrapped as `defining_head(...)`
/// when the defining head is `Flat` (spec.md §4.2 step 7's worked example:
/// `Plus(a,b,c)` matching `Plus(x_,y__)` binds `y` to `Plus(b,c)`) and as a
/// generic `Sequence(...)` otherwise, left for the evaluator's sequence-
/// splicing step to flatten into whatever argument list it lands in.
pub fn substitute(
    ctx: &Context,
    body: &Expr,
    bindings: &Bindings,
    defining_head: Name,
    defining_head_is_flat: bool,
) -> Expr {
    let sequence_name = ctx.interner.intern("Sequence");
    substitute_rec(body, bindings, defining_head, defining_head_is_flat, sequence_name)
}

fn substitute_rec(
    body: &Expr,
    bindings: &Bindings,
    defining_head: Name,
    defining_head_is_flat: bool,
    sequence_name: Name,
) -> Expr {
    match body {
        Expr::Symbol(name) => match bindings.get(*name) {
            Some(Binding::Single(v)) => v.clone(),
            Some(Binding::Sequence(elems)) => {
                let head = if defining_head_is_flat {
                    defining_head
                } else {
                    sequence_name
                };
                Expr::call(head, elems.clone())
            }
            None => body.clone(),
        },
        Expr::Compound { head, args } => {
            let new_head = substitute_rec(head, bindings, defining_head, defining_head_is_flat, sequence_name);
            let new_args = args
                .iter()
                .map(|a| substitute_rec(a, bindings, defining_head, defining_head_is_flat, sequence_name))
                .collect();
            Expr::compound(new_head, new_args)
        }
        _ => body.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_binding_replaces_its_symbol() {
        let ctx = Context::new();
        let x = ctx.interner.intern("x");
        let mut bindings = Bindings::new();
        bindings.bind(x, Binding::Single(Expr::integer(7)));
        let body = Expr::Symbol(x);
        let result = substitute(&ctx, &body, &bindings, x, false);
        assert_eq!(result, Expr::integer(7));
    }

    #[test]
    fn sequence_binding_under_non_flat_head_wraps_in_sequence() {
        let ctx = Context::new();
        let y = ctx.interner.intern("y");
        let f = ctx.interner.intern("f");
        let mut bindings = Bindings::new();
        bindings.bind(y, Binding::Sequence(vec![Expr::integer(1), Expr::integer(2)]));
        let body = Expr::Symbol(y);
        let result = substitute(&ctx, &body, &bindings, f, false);
        assert!(result.has_head(ctx.interner.intern("Sequence")));
    }

    #[test]
    fn sequence_binding_under_flat_head_wraps_in_defining_head() {
        let ctx = Context::new();
        let y = ctx.interner.intern("y");
        let plus = ctx.interner.intern("Plus");
        let mut bindings = Bindings::new();
        bindings.bind(y, Binding::Sequence(vec![Expr::integer(2), Expr::integer(3)]));
        let body = Expr::Symbol(y);
        let result = substitute(&ctx, &body, &bindings, plus, true);
        assert!(result.has_head(plus));
        assert_eq!(result.length(), 2);
    }

    #[test]
    fn unbound_symbol_passes_through_unchanged() {
        let ctx = Context::new();
        let z = ctx.interner.intern("z");
        let bindings = Bindings::new();
        let body = Expr::Symbol(z);
        let result = substitute(&ctx, &body, &bindings, z, false);
        assert_eq!(result, Expr::Symbol(z));
    }
}
