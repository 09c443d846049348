//! The generic attribute-driven evaluation pipeline (spec.md §4.5) plus
//! the top-level `evaluate` entry point that special forms, Function
//! application, and every kernel wrapper ultimately call back into.

use rf_ir::{format, Attributes, Expr};

use crate::context::Context;
use crate::errors;
use crate::special_forms;
use crate::symbol_table::RuleBody;

/// Evaluate `expr` to a fixed point under the rules `ctx` currently knows.
pub fn evaluate(ctx: &mut Context, expr: &Expr) -> Expr {
    match expr {
        Expr::Integer(_) | Expr::Real(_) | Expr::Str(_) | Expr::Bool(_) | Expr::ByteArray(_) | Expr::Association(_) | Expr::Error(_) => {
            expr.clone()
        }
        Expr::Symbol(name) => ctx.symbols.own_value(*name).cloned().unwrap_or_else(|| expr.clone()),
        Expr::Compound { head, args } => match head.as_ref() {
            Expr::Symbol(head_name) => {
                if let Some(result) = special_forms::dispatch(ctx, *head_name, args) {
                    return result;
                }
                eval_generic(ctx, *head_name, args)
            }
            _ => {
                let head_val = evaluate(ctx, head);
                if head_val.has_head(ctx.special.function) {
                    special_forms::apply_function(ctx, &head_val, args)
                } else {
                    evaluate(ctx, &Expr::compound(head_val, args.to_vec()))
                }
            }
        },
    }
}

fn eval_generic(ctx: &mut Context, head_name: rf_ir::Name, raw_args: &[Expr]) -> Expr {
    let attrs = ctx.symbols.attributes(head_name);

    // Step 2: hold-driven argument evaluation, with error short-circuit.
    let mut args: Vec<Expr> = Vec::with_capacity(raw_args.len());
    for (i, a) in raw_args.iter().enumerate() {
        let held = if attrs.contains(Attributes::HOLD_ALL) {
            true
        } else if attrs.contains(Attributes::HOLD_FIRST) {
            i == 0
        } else if attrs.contains(Attributes::HOLD_REST) {
            i != 0
        } else {
            false
        };
        let value = if held { a.clone() } else { evaluate(ctx, a) };
        if value.is_error() {
            return value;
        }
        args.push(value);
    }

    // Step 3: splice one level of `Sequence(...)` arguments.
    let sequence_name = ctx.interner.intern("Sequence");
    args = splice_head_once(&args, sequence_name);

    // Step 4: Flat splicing to a fixed point.
    if attrs.contains(Attributes::FLAT) {
        loop {
            let spliced = splice_head_once(&args, head_name);
            if spliced.len() == args.len() {
                break;
            }
            args = spliced;
        }
    }

    // Step 5: Listable threading.
    if attrs.contains(Attributes::LISTABLE) {
        if let Some(threaded) = try_thread_listable(ctx, head_name, &args) {
            return threaded;
        }
    }

    // Step 6: Orderless canonical sort.
    if attrs.contains(Attributes::ORDERLESS) {
        args.sort_by(|a, b| canonical_order(ctx, a, b));
    }

    // Step 7: OneIdentity collapse.
    if attrs.contains(Attributes::ONE_IDENTITY) {
        if let [only] = args.as_slice() {
            return only.clone();
        }
    }

    let candidate = Expr::call(head_name, args.clone());

    // Step 8: dispatch.
    let dispatched = dispatch(ctx, head_name, &args).unwrap_or_else(|| candidate.clone());

    // Step 9: fixed point.
    if dispatched.is_error() || dispatched.equals(&candidate) {
        return dispatched;
    }
    if !ctx.enter_recursion() {
        return errors::recursion_error(&ctx.interner, ctx.recursion_limit());
    }
    let result = evaluate(ctx, &dispatched);
    ctx.exit_recursion();
    result
}

/// Splice every direct argument whose head is `target` into the argument
/// list (one level; callers needing a fixed point loop this themselves).
fn splice_head_once(args: &[Expr], target: rf_ir::Name) -> Vec<Expr> {
    let mut out = Vec::with_capacity(args.len());
    for a in args {
        if a.has_head(target) {
            out.extend(a.args().iter().cloned());
        } else {
            out.push(a.clone());
        }
    }
    out
}

fn try_thread_listable(ctx: &mut Context, head_name: rf_ir::Name, args: &[Expr]) -> Option<Expr> {
    let list_name = ctx.canon.list;
    let lengths: Vec<usize> = args.iter().filter(|a| a.has_head(list_name)).map(|a| a.args().len()).collect();
    if lengths.is_empty() {
        return None;
    }
    let n = lengths[0];
    if lengths.iter().any(|&l| l != n) {
        return None;
    }
    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        let row_args: Vec<Expr> = args
            .iter()
            .map(|a| {
                if a.has_head(list_name) {
                    a.args()[i].clone()
                } else {
                    a.clone()
                }
            })
            .collect();
        rows.push(evaluate(ctx, &Expr::call(head_name, row_args)));
    }
    Some(Expr::compound(Expr::Symbol(list_name), rows))
}

fn canonical_order(ctx: &Context, a: &Expr, b: &Expr) -> std::cmp::Ordering {
    let interner = &*ctx.interner;
    (a.length(), format::input_form(a, interner)).cmp(&(b.length(), format::input_form(b, interner)))
}

/// Try the symbol's down-values in stored specificity order; apply the
/// first whose pattern matches.
fn dispatch(ctx: &mut Context, head_name: rf_ir::Name, args: &[Expr]) -> Option<Expr> {
    let target = Expr::call(head_name, args.to_vec());
    let rules: Vec<(Expr, RuleRef)> = {
        let entry = ctx.symbols.get(head_name)?;
        entry
            .down_values
            .iter()
            .map(|rule| (rule.pattern.clone(), clone_rule_body(&rule.body)))
            .collect()
    };
    for (pattern, body) in rules {
        let mctx = ctx.match_context();
        let Some(bindings) = rf_match::match_expr(&pattern, &target, &mctx) else {
            continue;
        };
        return Some(match body {
            RuleRef::Native(f) => f(ctx, args).unwrap_or_else(|| target.clone()),
            RuleRef::User(rhs) => {
                let defining_head_is_flat = ctx.symbols.attributes(head_name).contains(Attributes::FLAT);
                crate::substitute::substitute(ctx, &rhs, &bindings, head_name, defining_head_is_flat)
            }
        });
    }
    None
}

/// Owned copy of a `Rule`'s body, so dispatch doesn't hold a borrow of
/// `ctx.symbols` across the match/substitute calls that need `&mut ctx`.
enum RuleRef {
    Native(fn(&Context, &[Expr]) -> Option<Expr>),
    User(Expr),
}

fn clone_rule_body(body: &RuleBody) -> RuleRef {
    match body {
        RuleBody::Native(f) => RuleRef::Native(*f),
        RuleBody::User { body } => RuleRef::User(body.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms_self_evaluate() {
        let mut ctx = Context::new();
        assert_eq!(evaluate(&mut ctx, &Expr::integer(5)), Expr::integer(5));
    }

    #[test]
    fn unbound_symbol_evaluates_to_itself() {
        let mut ctx = Context::new();
        let x = ctx.interner.intern("x");
        assert_eq!(evaluate(&mut ctx, &Expr::Symbol(x)), Expr::Symbol(x));
    }

    #[test]
    fn bound_symbol_evaluates_to_its_own_value() {
        let mut ctx = Context::new();
        let x = ctx.interner.intern("x");
        ctx.symbols.set_own_value(x, Some(Expr::integer(42)));
        assert_eq!(evaluate(&mut ctx, &Expr::Symbol(x)), Expr::integer(42));
    }

    #[test]
    fn pi_has_its_numeric_own_value() {
        let mut ctx = Context::new();
        let pi = ctx.interner.intern("Pi");
        assert_eq!(evaluate(&mut ctx, &Expr::Symbol(pi)), Expr::real(std::f64::consts::PI));
    }

    #[test]
    fn error_short_circuits_argument_evaluation() {
        let mut ctx = Context::new();
        let f = ctx.interner.intern("f");
        let divide = ctx.interner.intern("Divide");
        let bad = Expr::call(divide, vec![Expr::integer(1), Expr::integer(0)]);
        let expr = Expr::call(f, vec![bad.clone(), Expr::integer(99)]);
        let result = evaluate(&mut ctx, &expr);
        assert!(result.is_error());
    }

    #[test]
    fn user_rule_dispatches_by_specificity() {
        let mut ctx = Context::new();
        let f = ctx.interner.intern("f");
        let x = ctx.interner.intern("x");
        let set_name = ctx.special.set;
        let general_pattern = Expr::call(f, vec![rf_ir::canon::named_blank(&ctx.canon, x, None)]);
        let specific_pattern = Expr::call(f, vec![Expr::integer(0)]);
        evaluate(&mut ctx, &Expr::call(set_name, vec![general_pattern, Expr::string("general")]));
        evaluate(&mut ctx, &Expr::call(set_name, vec![specific_pattern, Expr::string("specific")]));

        let call_specific = Expr::call(f, vec![Expr::integer(0)]);
        let call_general = Expr::call(f, vec![Expr::integer(7)]);
        assert_eq!(evaluate(&mut ctx, &call_specific), Expr::string("specific"));
        assert_eq!(evaluate(&mut ctx, &call_general), Expr::string("general"));
    }

    #[test]
    fn flat_splices_nested_calls_of_the_same_head() {
        let mut ctx = Context::new();
        let plus = ctx.interner.intern("Plus");
        ctx.symbols.set_attributes(plus, Attributes::FLAT | Attributes::ORDERLESS);
        let inner = Expr::call(plus, vec![Expr::integer(1), Expr::integer(2)]);
        let outer = Expr::call(plus, vec![inner, Expr::integer(3)]);
        let result = evaluate(&mut ctx, &outer);
        assert_eq!(result, Expr::call(plus, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]));
    }

    #[test]
    fn one_identity_collapses_a_single_argument() {
        let mut ctx = Context::new();
        let plus = ctx.interner.intern("Plus");
        ctx.symbols.set_attributes(plus, Attributes::ONE_IDENTITY | Attributes::FLAT);
        let expr = Expr::call(plus, vec![Expr::integer(9)]);
        assert_eq!(evaluate(&mut ctx, &expr), Expr::integer(9));
    }

    #[test]
    fn listable_threads_over_corresponding_list_elements() {
        let mut ctx = Context::new();
        let list = ctx.canon.list;
        let f = ctx.interner.intern("f");
        ctx.symbols.set_attributes(f, Attributes::LISTABLE);
        let xs = Expr::call(list, vec![Expr::integer(1), Expr::integer(2)]);
        let expr = Expr::call(f, vec![xs]);
        let result = evaluate(&mut ctx, &expr);
        assert_eq!(
            result,
            Expr::call(list, vec![Expr::call(f, vec![Expr::integer(1)]), Expr::call(f, vec![Expr::integer(2)])])
        );
    }
}
