//! End-to-end evaluator scenarios, one per spec.md §8 seed case plus the
//! boundary behaviors it calls out. Each test builds an `Expr` tree by hand
//! (the surface parser is out of scope) and checks what `evaluate` produces.

use rf_eval::{evaluate, Context};
use rf_ir::Expr;

fn sym(ctx: &Context, name: &str) -> Expr {
    Expr::Symbol(ctx.interner.intern(name))
}

fn call(ctx: &Context, head: &str, args: Vec<Expr>) -> Expr {
    let h = ctx.interner.intern(head);
    Expr::call(h, args)
}

#[test]
fn plus_folds_all_integer_arguments() {
    let mut ctx = Context::new();
    let expr = call(&ctx, "Plus", vec![Expr::integer(1), Expr::integer(2), Expr::integer(3), Expr::integer(4)]);
    assert_eq!(evaluate(&mut ctx, &expr), Expr::integer(10));
}

#[test]
fn plus_folds_numeric_terms_and_orderless_sorts_the_rest() {
    let mut ctx = Context::new();
    let x = sym(&ctx, "x");
    let y = sym(&ctx, "y");
    let z = sym(&ctx, "z");
    let expr = call(&ctx, "Plus", vec![x.clone(), y.clone(), z.clone(), Expr::real(2.0), Expr::integer(1)]);
    let expected = call(&ctx, "Plus", vec![Expr::real(3.0), x, y, z]);
    assert_eq!(evaluate(&mut ctx, &expr), expected);
}

#[test]
fn replace_rewrites_with_a_rule_binding_a_sequence_tail() {
    let mut ctx = Context::new();
    let zoo_xyz = call(&ctx, "Zoo", vec![Expr::integer(1), Expr::integer(3), sym(&ctx, "x")]);

    let x_var = ctx.interner.intern("x");
    let y_var = ctx.interner.intern("y");
    let z_var = ctx.interner.intern("z");
    let integer_t = ctx.classifiers.integer;
    let lhs_pattern = call(
        &ctx,
        "Zoo",
        vec![
            rf_ir::canon::named_blank(&ctx.canon, x_var, Some(Expr::Symbol(integer_t))),
            rf_ir::canon::named_blank(&ctx.canon, y_var, Some(Expr::Symbol(integer_t))),
            rf_ir::canon::named_blank_sequence(&ctx.canon, z_var, None),
        ],
    );
    let rhs = call(
        &ctx,
        "Zoo",
        vec![call(&ctx, "Plus", vec![sym(&ctx, "x"), sym(&ctx, "y")]), sym(&ctx, "z")],
    );
    let rule = rf_ir::canon::rule(&ctx.canon, lhs_pattern, rhs);

    let expr = call(&ctx, "Replace", vec![zoo_xyz, rule]);
    let expected = call(&ctx, "Zoo", vec![Expr::integer(4), sym(&ctx, "x")]);
    assert_eq!(evaluate(&mut ctx, &expr), expected);
}

#[test]
fn replace_all_recurses_using_a_delayed_rule() {
    let mut ctx = Context::new();
    let x = sym(&ctx, "x");
    let y = sym(&ctx, "y");
    let target = call(&ctx, "Plus", vec![call(&ctx, "f", vec![x.clone()]), call(&ctx, "f", vec![y.clone()])]);

    let z_var = ctx.interner.intern("z");
    let lhs = call(&ctx, "f", vec![rf_ir::canon::named_blank(&ctx.canon, z_var, None)]);
    let rhs = call(&ctx, "Times", vec![Expr::integer(2), sym(&ctx, "z")]);
    let rule_delayed = rf_ir::canon::rule_delayed(&ctx.canon, lhs, rhs);

    let expr = call(&ctx, "ReplaceAll", vec![target, rule_delayed]);
    let expected = call(
        &ctx,
        "Plus",
        vec![call(&ctx, "Times", vec![Expr::integer(2), x]), call(&ctx, "Times", vec![Expr::integer(2), y])],
    );
    assert_eq!(evaluate(&mut ctx, &expr), expected);
}

#[test]
fn block_restores_the_own_value_after_the_body_runs() {
    let mut ctx = Context::new();
    let x_name = ctx.interner.intern("x");
    let bindings = call(&ctx, "List", vec![call(&ctx, "Set", vec![sym(&ctx, "x"), Expr::integer(5)])]);
    let body = call(&ctx, "Plus", vec![sym(&ctx, "x"), Expr::integer(2)]);
    let expr = call(&ctx, "Block", vec![bindings, body]);

    assert_eq!(evaluate(&mut ctx, &expr), Expr::integer(7));
    assert_eq!(ctx.symbols.own_value(x_name), None);
    let x_expr = sym(&ctx, "x");
    assert_eq!(evaluate(&mut ctx, &x_expr), x_expr);
}

#[test]
fn table_produces_a_list_over_the_iterator_range() {
    let mut ctx = Context::new();
    let i_sym = sym(&ctx, "i");
    let body = call(&ctx, "Times", vec![i_sym.clone(), Expr::integer(2)]);
    let iterator = call(&ctx, "List", vec![i_sym, Expr::integer(1), Expr::integer(3)]);
    let expr = call(&ctx, "Table", vec![body, iterator]);
    let expected = call(&ctx, "List", vec![Expr::integer(2), Expr::integer(4), Expr::integer(6)]);
    assert_eq!(evaluate(&mut ctx, &expr), expected);
}

#[test]
fn match_q_reports_structural_matches_and_type_mismatches() {
    let mut ctx = Context::new();
    let target = call(&ctx, "Zoo", vec![Expr::integer(1), Expr::integer(2), sym(&ctx, "a"), sym(&ctx, "b")]);

    let x_var = ctx.interner.intern("x");
    let y_var = ctx.interner.intern("y");
    let z_var = ctx.interner.intern("z");
    let integer_t = ctx.classifiers.integer;

    let loose_pattern = call(
        &ctx,
        "Zoo",
        vec![
            rf_ir::canon::named_blank(&ctx.canon, x_var, Some(Expr::Symbol(integer_t))),
            rf_ir::canon::named_blank(&ctx.canon, y_var, Some(Expr::Symbol(integer_t))),
            rf_ir::canon::named_blank_null_sequence(&ctx.canon, z_var, None),
        ],
    );
    let expr = call(&ctx, "MatchQ", vec![target.clone(), loose_pattern]);
    assert_eq!(evaluate(&mut ctx, &expr), Expr::boolean(true));

    let typed_pattern = call(
        &ctx,
        "Zoo",
        vec![
            rf_ir::canon::named_blank(&ctx.canon, x_var, Some(Expr::Symbol(integer_t))),
            rf_ir::canon::named_blank(&ctx.canon, y_var, Some(Expr::Symbol(integer_t))),
            rf_ir::canon::named_blank_null_sequence(&ctx.canon, z_var, Some(Expr::Symbol(integer_t))),
        ],
    );
    let expr2 = call(&ctx, "MatchQ", vec![target, typed_pattern]);
    assert_eq!(evaluate(&mut ctx, &expr2), Expr::boolean(false));
}

#[test]
fn sort_orders_by_length_then_input_form_lexicographically() {
    let mut ctx = Context::new();
    let expr = call(&ctx, "Sort", vec![call(&ctx, "List", vec![sym(&ctx, "xx"), sym(&ctx, "a"), sym(&ctx, "zzz")])]);
    let expected = call(&ctx, "List", vec![sym(&ctx, "a"), sym(&ctx, "xx"), sym(&ctx, "zzz")]);
    assert_eq!(evaluate(&mut ctx, &expr), expected);

    let expr2 = call(&ctx, "Sort", vec![call(&ctx, "List", vec![sym(&ctx, "x"), Expr::integer(1), Expr::integer(10)])]);
    let expected2 = call(&ctx, "List", vec![Expr::integer(1), Expr::integer(10), sym(&ctx, "x")]);
    assert_eq!(evaluate(&mut ctx, &expr2), expected2);
}

#[test]
fn nested_if_evaluates_only_the_taken_branch() {
    let mut ctx = Context::new();
    let inner_if = call(
        &ctx,
        "If",
        vec![Expr::boolean(false), Expr::string("inner true"), Expr::string("inner false")],
    );
    let expr = call(&ctx, "If", vec![Expr::boolean(true), inner_if, Expr::string("outer false")]);
    assert_eq!(evaluate(&mut ctx, &expr), Expr::string("inner false"));
}

#[test]
fn and_short_circuits_before_touching_an_undefined_symbol() {
    let mut ctx = Context::new();
    let expr = call(&ctx, "And", vec![Expr::boolean(false), sym(&ctx, "undefined_symbol")]);
    assert_eq!(evaluate(&mut ctx, &expr), Expr::boolean(false));
}

#[test]
fn part_at_index_zero_is_an_error() {
    let mut ctx = Context::new();
    let list = call(&ctx, "List", vec![Expr::integer(1), Expr::integer(2)]);
    let expr = call(&ctx, "Part", vec![list, Expr::integer(0)]);
    let result = evaluate(&mut ctx, &expr);
    assert!(result.is_error());
}

#[test]
fn divide_by_zero_is_an_error_for_integer_and_real() {
    let mut ctx = Context::new();
    let int_expr = call(&ctx, "Divide", vec![Expr::integer(4), Expr::integer(0)]);
    assert!(evaluate(&mut ctx, &int_expr).is_error());

    let real_expr = call(&ctx, "Divide", vec![Expr::real(4.0), Expr::real(0.0)]);
    assert!(evaluate(&mut ctx, &real_expr).is_error());
}

#[test]
fn power_producing_a_non_finite_result_is_a_mathematical_error() {
    let mut ctx = Context::new();
    // 0^-1 is a division by a zero base under powf, i.e. +Inf.
    let expr = call(&ctx, "Power", vec![Expr::integer(0), Expr::integer(-1)]);
    assert!(evaluate(&mut ctx, &expr).is_error());
}

#[test]
fn set_on_a_protected_symbol_is_an_error() {
    let mut ctx = Context::new();
    let expr = call(&ctx, "Set", vec![sym(&ctx, "Pi"), Expr::integer(4)]);
    assert!(evaluate(&mut ctx, &expr).is_error());
}

#[test]
fn evaluate_runs_to_a_fixed_point() {
    let mut ctx = Context::new();
    let expr = call(&ctx, "Plus", vec![Expr::integer(1), Expr::integer(2), Expr::integer(3), Expr::integer(4)]);
    let once = evaluate(&mut ctx, &expr);
    let twice = evaluate(&mut ctx, &once);
    assert_eq!(once, twice);
}

#[test]
fn orderless_and_flat_canonicalize_regardless_of_argument_order_or_nesting() {
    let mut ctx = Context::new();
    let x = sym(&ctx, "x");
    let y = sym(&ctx, "y");

    let flat_nested = call(&ctx, "Plus", vec![x.clone(), call(&ctx, "Plus", vec![y.clone(), Expr::integer(1)])]);
    let flat_splices = call(&ctx, "Plus", vec![x.clone(), y.clone(), Expr::integer(1)]);
    assert_eq!(evaluate(&mut ctx, &flat_nested), evaluate(&mut ctx, &flat_splices));

    let order_a = call(&ctx, "Plus", vec![x.clone(), y.clone(), Expr::integer(1)]);
    let order_b = call(&ctx, "Plus", vec![Expr::integer(1), y, x]);
    assert_eq!(evaluate(&mut ctx, &order_a), evaluate(&mut ctx, &order_b));
}
