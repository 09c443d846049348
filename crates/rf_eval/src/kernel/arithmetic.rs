//! Plus/Times and the rest of the numeric tower (spec.md §4.4), plus the
//! supplemented `Mod`/`Quotient`/`Min`/`Max` operators.
//!
//! Every wrapper here only fires once the matcher has already confirmed the
//! call shape (a variadic `head(args___)` down-value, see `kernel::mod`);
//! its own job is purely numeric partitioning and folding. Returning `None`
//! means "nothing to combine", which the evaluator reads as a symbolic
//! passthrough, not a failure.

use rf_ir::Expr;

use crate::context::Context;
use crate::errors;

struct NumericSplit<'a> {
    all_integer: bool,
    int_values: Vec<i64>,
    real_values: Vec<f64>,
    symbolic: Vec<&'a Expr>,
}

fn split_numeric(args: &[Expr]) -> NumericSplit<'_> {
    let mut int_values = Vec::new();
    let mut real_values = Vec::new();
    let mut symbolic = Vec::new();
    let mut all_integer = true;
    for a in args {
        match a {
            Expr::Integer(n) => {
                int_values.push(*n);
                real_values.push(*n as f64);
            }
            Expr::Real(n) => {
                all_integer = false;
                real_values.push(*n);
            }
            other => symbolic.push(other),
        }
    }
    NumericSplit {
        all_integer,
        int_values,
        real_values,
        symbolic,
    }
}

fn as_f64(e: &Expr) -> Option<f64> {
    match e {
        Expr::Integer(n) => Some(*n as f64),
        Expr::Real(n) => Some(*n),
        _ => None,
    }
}

fn numeric_pair(args: &[Expr]) -> Option<(Expr, Expr)> {
    match args {
        [a @ (Expr::Integer(_) | Expr::Real(_)), b @ (Expr::Integer(_) | Expr::Real(_))] => Some((a.clone(), b.clone())),
        _ => None,
    }
}

pub fn plus(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    if args.is_empty() {
        return Some(Expr::integer(0));
    }
    let split = split_numeric(args);
    let numeric_count = args.len() - split.symbolic.len();
    if numeric_count < 2 {
        return None;
    }
    let sum_expr = if split.all_integer {
        let mut total: i64 = 0;
        for n in &split.int_values {
            match total.checked_add(*n) {
                Some(t) => total = t,
                None => return Some(errors::mathematical_error(&ctx.interner, "integer overflow in Plus", args.to_vec())),
            }
        }
        Expr::integer(total)
    } else {
        Expr::real(split.real_values.iter().sum())
    };
    let is_zero = matches!(sum_expr, Expr::Integer(0)) || matches!(&sum_expr, Expr::Real(r) if *r == 0.0);
    let mut terms: Vec<Expr> = split.symbolic.into_iter().cloned().collect();
    if !is_zero || terms.is_empty() {
        terms.push(sum_expr);
    }
    if terms.len() == 1 {
        return terms.into_iter().next();
    }
    let plus_name = ctx.interner.intern("Plus");
    Some(Expr::call(plus_name, terms))
}

pub fn times(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    if args.is_empty() {
        return Some(Expr::integer(1));
    }
    let split = split_numeric(args);
    let numeric_count = args.len() - split.symbolic.len();
    if numeric_count < 1 {
        return None;
    }
    let product_expr = if split.all_integer {
        let mut total: i64 = 1;
        for n in &split.int_values {
            match total.checked_mul(*n) {
                Some(t) => total = t,
                None => return Some(errors::mathematical_error(&ctx.interner, "integer overflow in Times", args.to_vec())),
            }
        }
        Expr::integer(total)
    } else {
        Expr::real(split.real_values.iter().product())
    };
    let is_zero = matches!(product_expr, Expr::Integer(0)) || matches!(&product_expr, Expr::Real(r) if *r == 0.0);
    if is_zero {
        return Some(product_expr);
    }
    let is_one = matches!(product_expr, Expr::Integer(1)) || matches!(&product_expr, Expr::Real(r) if (*r - 1.0).abs() < f64::EPSILON);
    if numeric_count < 2 && !is_one {
        return None;
    }
    let mut terms: Vec<Expr> = split.symbolic.into_iter().cloned().collect();
    if !is_one || terms.is_empty() {
        terms.push(product_expr);
    }
    if terms.len() == 1 {
        return terms.into_iter().next();
    }
    let times_name = ctx.interner.intern("Times");
    Some(Expr::call(times_name, terms))
}

fn binary_numeric(
    ctx: &Context,
    args: &[Expr],
    op_name: &str,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Option<Expr> {
    let (a, b) = numeric_pair(args)?;
    match (&a, &b) {
        (Expr::Integer(x), Expr::Integer(y)) => match int_op(*x, *y) {
            Some(v) => Some(Expr::integer(v)),
            None => Some(errors::mathematical_error(&ctx.interner, format!("integer overflow in {op_name}"), args.to_vec())),
        },
        _ => {
            let x = as_f64(&a)?;
            let y = as_f64(&b)?;
            Some(Expr::real(float_op(x, y)))
        }
    }
}

pub fn subtract(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    binary_numeric(ctx, args, "Subtract", i64::checked_sub, |a, b| a - b)
}

pub fn divide(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let (a, b) = numeric_pair(args)?;
    let is_zero = matches!(&b, Expr::Integer(0)) || matches!(&b, Expr::Real(r) if *r == 0.0);
    if is_zero {
        return Some(errors::division_by_zero(&ctx.interner, args.to_vec()));
    }
    match (&a, &b) {
        (Expr::Integer(x), Expr::Integer(y)) if x % y == 0 => Some(Expr::integer(x / y)),
        _ => {
            let x = as_f64(&a)?;
            let y = as_f64(&b)?;
            Some(Expr::real(x / y))
        }
    }
}

fn checked_ipow(base: i64, exp: u32) -> Option<i64> {
    let mut result: i64 = 1;
    for _ in 0..exp {
        result = result.checked_mul(base)?;
    }
    Some(result)
}

/// `Power(Integer, Integer)` with a negative exponent always returns a
/// `Real` (or `MathematicalError` on a non-finite result) rather than a
/// rational — this crate has no exact-rational type.
pub fn power(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let (a, b) = numeric_pair(args)?;
    match (&a, &b) {
        (Expr::Integer(base), Expr::Integer(exp)) if *exp >= 0 => match checked_ipow(*base, *exp as u32) {
            Some(v) => Some(Expr::integer(v)),
            None => Some(errors::mathematical_error(&ctx.interner, "integer overflow in Power", args.to_vec())),
        },
        _ => {
            let x = as_f64(&a)?;
            let y = as_f64(&b)?;
            let result = x.powf(y);
            if result.is_finite() {
                Some(Expr::real(result))
            } else {
                Some(errors::mathematical_error(&ctx.interner, "non-finite result in Power", args.to_vec()))
            }
        }
    }
}

pub fn minus(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    match args {
        [Expr::Integer(n)] => Some(Expr::integer(-n)),
        [Expr::Real(n)] => Some(Expr::real(-n)),
        _ => None,
    }
}

pub fn modulo(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [Expr::Integer(x), Expr::Integer(y)] = args else { return None };
    if *y == 0 {
        return Some(errors::division_by_zero(&ctx.interner, args.to_vec()));
    }
    Some(Expr::integer(x.rem_euclid(*y)))
}

pub fn quotient(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [Expr::Integer(x), Expr::Integer(y)] = args else { return None };
    if *y == 0 {
        return Some(errors::division_by_zero(&ctx.interner, args.to_vec()));
    }
    Some(Expr::integer(x.div_euclid(*y)))
}

fn variadic_extreme(ctx: &Context, args: &[Expr], head_name: &str, want_min: bool) -> Option<Expr> {
    let split = split_numeric(args);
    let numeric_count = args.len() - split.symbolic.len();
    if numeric_count < 2 {
        return None;
    }
    let extreme = if split.all_integer {
        let picked = if want_min {
            split.int_values.iter().copied().min()
        } else {
            split.int_values.iter().copied().max()
        };
        match picked {
            Some(v) => Expr::integer(v),
            None => return None,
        }
    } else {
        let picked = split.real_values.iter().copied().reduce(|a, b| {
            let keep_a = if want_min { a <= b } else { a >= b };
            if keep_a {
                a
            } else {
                b
            }
        });
        match picked {
            Some(v) => Expr::real(v),
            None => return None,
        }
    };
    let mut terms: Vec<Expr> = split.symbolic.into_iter().cloned().collect();
    terms.push(extreme);
    if terms.len() == 1 {
        return terms.into_iter().next();
    }
    let name = ctx.interner.intern(head_name);
    Some(Expr::call(name, terms))
}

pub fn min(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    variadic_extreme(ctx, args, "Min", true)
}

pub fn max(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    variadic_extreme(ctx, args, "Max", false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_folds_integer_literals_and_keeps_symbolic_terms() {
        let ctx = Context::new();
        let x = ctx.interner.intern("x");
        let args = vec![Expr::integer(1), Expr::integer(2), Expr::Symbol(x)];
        let result = plus(&ctx, &args).expect("should combine");
        assert!(result.has_head(ctx.interner.intern("Plus")));
        assert_eq!(result.length(), 2);
    }

    #[test]
    fn times_short_circuits_on_zero() {
        let ctx = Context::new();
        let x = ctx.interner.intern("x");
        let args = vec![Expr::integer(0), Expr::Symbol(x)];
        assert_eq!(times(&ctx, &args), Some(Expr::integer(0)));
    }

    #[test]
    fn divide_by_zero_is_an_error() {
        let ctx = Context::new();
        let args = vec![Expr::integer(1), Expr::integer(0)];
        assert!(divide(&ctx, &args).expect("should fire").is_error());
    }

    #[test]
    fn divide_reduces_to_integer_when_it_divides_evenly() {
        let ctx = Context::new();
        let args = vec![Expr::integer(6), Expr::integer(3)];
        assert_eq!(divide(&ctx, &args), Some(Expr::integer(2)));
    }

    #[test]
    fn power_with_negative_exponent_returns_a_real() {
        let ctx = Context::new();
        let args = vec![Expr::integer(2), Expr::integer(-1)];
        assert_eq!(power(&ctx, &args), Some(Expr::real(0.5)));
    }

    #[test]
    fn plus_of_no_arguments_is_zero() {
        let ctx = Context::new();
        assert_eq!(plus(&ctx, &[]), Some(Expr::integer(0)));
    }

    #[test]
    fn times_of_no_arguments_is_one() {
        let ctx = Context::new();
        assert_eq!(times(&ctx, &[]), Some(Expr::integer(1)));
    }

    #[test]
    fn min_folds_numeric_literals() {
        let ctx = Context::new();
        let args = vec![Expr::integer(3), Expr::integer(1), Expr::integer(2)];
        assert_eq!(min(&ctx, &args), Some(Expr::integer(1)));
    }
}
