//! Surface-syntax sugar canonicalized into plain `Expr` trees.
//!
//! None of this is parsing (lexing/tokenizing is an external collaborator);
//! it's the small set of constructors a front end or a macro-like builder
//! calls to get the canonical compound shape for a piece of sugar, so the
//! matcher and evaluator only ever have to know one representation per
//! concept.

use crate::expr::Expr;
use crate::name::Name;

/// The fixed set of interned head symbols the canonicalizers need, resolved
/// once per `Context` the same way `ClassifierNames` is.
#[derive(Clone, Copy)]
pub struct CanonNames {
    pub rule: Name,
    pub rule_delayed: Name,
    pub pattern: Name,
    pub blank: Name,
    pub blank_sequence: Name,
    pub blank_null_sequence: Name,
    pub list: Name,
    pub association: Name,
    pub function: Name,
    pub slot: Name,
    pub part: Name,
    pub take: Name,
}

impl CanonNames {
    pub fn new(interner: &crate::name::StringInterner) -> Self {
        CanonNames {
            rule: interner.intern("Rule"),
            rule_delayed: interner.intern("RuleDelayed"),
            pattern: interner.intern("Pattern"),
            blank: interner.intern("Blank"),
            blank_sequence: interner.intern("BlankSequence"),
            blank_null_sequence: interner.intern("BlankNullSequence"),
            list: interner.intern("List"),
            association: interner.intern("Association"),
            function: interner.intern("Function"),
            slot: interner.intern("Slot"),
            part: interner.intern("Part"),
            take: interner.intern("Take"),
        }
    }
}

/// `a : b` -> `Rule(a, b)`.
pub fn rule(names: &CanonNames, lhs: Expr, rhs: Expr) -> Expr {
    Expr::call(names.rule, vec![lhs, rhs])
}

/// `a => b` -> `RuleDelayed(a, b)`.
pub fn rule_delayed(names: &CanonNames, lhs: Expr, rhs: Expr) -> Expr {
    Expr::call(names.rule_delayed, vec![lhs, rhs])
}

/// `x_` -> `Pattern(x, Blank())`; a bare, unnamed `_` has no `x`, see
/// `anonymous_blank`.
pub fn named_blank(names: &CanonNames, var: Name, type_filter: Option<Expr>) -> Expr {
    let blank = match type_filter {
        Some(t) => Expr::call(names.blank, vec![t]),
        None => Expr::call(names.blank, vec![]),
    };
    Expr::call(names.pattern, vec![Expr::Symbol(var), blank])
}

/// `_` / `_T` with no bound variable.
pub fn anonymous_blank(names: &CanonNames, type_filter: Option<Expr>) -> Expr {
    match type_filter {
        Some(t) => Expr::call(names.blank, vec![t]),
        None => Expr::call(names.blank, vec![]),
    }
}

/// `x__` -> `Pattern(x, BlankSequence())`.
pub fn named_blank_sequence(names: &CanonNames, var: Name, type_filter: Option<Expr>) -> Expr {
    let bs = match type_filter {
        Some(t) => Expr::call(names.blank_sequence, vec![t]),
        None => Expr::call(names.blank_sequence, vec![]),
    };
    Expr::call(names.pattern, vec![Expr::Symbol(var), bs])
}

/// `x___` -> `Pattern(x, BlankNullSequence())`.
pub fn named_blank_null_sequence(names: &CanonNames, var: Name, type_filter: Option<Expr>) -> Expr {
    let bns = match type_filter {
        Some(t) => Expr::call(names.blank_null_sequence, vec![t]),
        None => Expr::call(names.blank_null_sequence, vec![]),
    };
    Expr::call(names.pattern, vec![Expr::Symbol(var), bns])
}

/// `{a, b, c}` -> `List(a, b, c)`.
pub fn list(names: &CanonNames, items: Vec<Expr>) -> Expr {
    Expr::compound(Expr::Symbol(names.list), items)
}

/// `<| k1 -> v1, k2 -> v2 |>` -> `Association(Rule(k1, v1), Rule(k2, v2), ...)`,
/// which is then immediately folded by `Expr::association` into the
/// ordered, lookup-indexed runtime representation.
pub fn association_literal(names: &CanonNames, pairs: Vec<(Expr, Expr)>) -> Expr {
    Expr::association(pairs)
}

/// A `Function` literal with explicit parameters: `Function({x, y}, body)`.
pub fn function(names: &CanonNames, params: Vec<Name>, body: Expr) -> Expr {
    let param_list = list(names, params.into_iter().map(Expr::Symbol).collect());
    Expr::call(names.function, vec![param_list, body])
}

/// A bare `#`/`#1`/`##`-style slot function has no explicit parameter list:
/// `Function(body)`, with `Slot(n)` references resolved against the actual
/// call arguments at application time.
pub fn slot_function(names: &CanonNames, body: Expr) -> Expr {
    Expr::call(names.function, vec![body])
}

/// `#n` -> `Slot(n)`.
pub fn slot(names: &CanonNames, index: i64) -> Expr {
    Expr::call(names.slot, vec![Expr::integer(index)])
}

/// `expr[[i]]` -> `Part(expr, i)`.
pub fn part(names: &CanonNames, target: Expr, index: Expr) -> Expr {
    Expr::call(names.part, vec![target, index])
}

/// `expr[[i ;; j]]` -> `Take(expr, List(i, j))`.
pub fn slice(names: &CanonNames, target: Expr, start: Expr, end: Expr) -> Expr {
    Expr::call(names.take, vec![target, list(names, vec![start, end])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::StringInterner;

    #[test]
    fn named_blank_wraps_pattern_around_blank() {
        let interner = StringInterner::new();
        let names = CanonNames::new(&interner);
        let x = interner.intern("x");
        let expr = named_blank(&names, x, None);
        assert!(expr.has_head(names.pattern));
        let (_, args) = expr.as_compound().unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0], Expr::Symbol(x));
        assert!(args[1].has_head(names.blank));
    }

    #[test]
    fn named_blank_with_type_filter_carries_the_type() {
        let interner = StringInterner::new();
        let names = CanonNames::new(&interner);
        let x = interner.intern("x");
        let integer_ty = interner.intern("Integer");
        let expr = named_blank(&names, x, Some(Expr::Symbol(integer_ty)));
        let (_, args) = expr.as_compound().unwrap();
        let (_, blank_args) = args[1].as_compound().unwrap();
        assert_eq!(blank_args[0], Expr::Symbol(integer_ty));
    }

    #[test]
    fn list_sugar_canonicalizes_to_list_head() {
        let interner = StringInterner::new();
        let names = CanonNames::new(&interner);
        let expr = list(&names, vec![Expr::integer(1), Expr::integer(2)]);
        assert!(expr.has_head(names.list));
        assert_eq!(expr.length(), 2);
    }

    #[test]
    fn slice_canonicalizes_to_take_over_a_range_list() {
        let interner = StringInterner::new();
        let names = CanonNames::new(&interner);
        let expr = slice(&names, Expr::Symbol(names.list), Expr::integer(1), Expr::integer(3));
        assert!(expr.has_head(names.take));
        let (_, args) = expr.as_compound().unwrap();
        assert!(args[1].has_head(names.list));
    }
}
