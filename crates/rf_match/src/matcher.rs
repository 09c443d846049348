//! The matcher proper: atom equality, Blank-family matching, sequence
//! backtracking, Orderless permutation search, and the `test_match`
//! bool-only entry point.

use rf_ir::expr::head_classifier;
use rf_ir::{Attributes, CanonNames, ClassifierNames, Expr, Name, StringLookup};

use crate::attrs::AttributeLookup;
use crate::bindings::{Binding, Bindings};
use crate::shape::{analyze, Shape};

/// Everything the matcher needs besides the pattern and target themselves.
pub struct MatchContext<'a, A: AttributeLookup, I: StringLookup> {
    pub canon: &'a CanonNames,
    pub classifiers: &'a ClassifierNames,
    pub attrs: &'a A,
    pub interner: &'a I,
}

/// Match a whole pattern against a whole target expression.
///
/// Modeled as sequence-matching a one-element pattern list against a
/// one-element target list: this is exactly what `spec.md` step 2
/// ("Blank/BlankSequence/BlankNullSequence without enclosing compound:
/// bind directly") describes, and it lets a bare `x___` at the top level
/// match or decline based on the same `min` logic used inside compounds,
/// with no special-casing.
pub fn match_expr<A: AttributeLookup, I: StringLookup>(
    pattern: &Expr,
    target: &Expr,
    ctx: &MatchContext<A, I>,
) -> Option<Bindings> {
    let mut bindings = Bindings::new();
    if match_sequence(
        std::slice::from_ref(pattern),
        std::slice::from_ref(target),
        &mut bindings,
        ctx,
    ) {
        Some(bindings)
    } else {
        None
    }
}

/// Pure bool-only entry point; discards bindings.
pub fn test_match<A: AttributeLookup, I: StringLookup>(
    pattern: &Expr,
    target: &Expr,
    ctx: &MatchContext<A, I>,
) -> bool {
    match_expr(pattern, target, ctx).is_some()
}

fn classifier_matches<I: StringLookup>(
    target: &Expr,
    filter: Option<&Expr>,
    classifiers: &ClassifierNames,
    interner: &I,
) -> bool {
    let Some(filter_expr) = filter else {
        return true;
    };
    let Expr::Symbol(filter_name) = filter_expr else {
        return false;
    };
    if *filter_name == classifiers.number {
        return matches!(target, Expr::Integer(_) | Expr::Real(_));
    }
    head_classifier(target, interner, classifiers) == *filter_name
}

/// Match one "Fixed"-shaped pattern against exactly one target.
fn match_single<A: AttributeLookup, I: StringLookup>(
    pattern: &Expr,
    target: &Expr,
    bindings: &mut Bindings,
    ctx: &MatchContext<A, I>,
) -> bool {
    if let Some((head, args)) = pattern.as_compound() {
        if let Expr::Symbol(h) = head {
            if *h == ctx.canon.pattern && args.len() == 2 {
                if let Expr::Symbol(var) = &args[0] {
                    let mut trial = bindings.clone();
                    if match_single(&args[1], target, &mut trial, ctx)
                        && trial.bind(*var, Binding::Single(target.clone()))
                    {
                        *bindings = trial;
                        return true;
                    }
                    return false;
                }
            }
            if *h == ctx.canon.blank {
                return classifier_matches(target, args.first(), ctx.classifiers, ctx.interner);
            }
            // General compound pattern: heads and argument sequences must match.
            let (target_head, target_args) = match target.as_compound() {
                Some(t) => t,
                None => return false,
            };
            let mut trial = bindings.clone();
            if !match_single(head, target_head, &mut trial, ctx) {
                return false;
            }
            let head_attrs = match target_head {
                Expr::Symbol(name) => ctx.attrs.attributes_of(*name),
                _ => Attributes::empty(),
            };
            let matched = if head_attrs.contains(Attributes::ORDERLESS) {
                match_orderless(args, target_args, &mut trial, ctx)
            } else {
                match_sequence(args, target_args, &mut trial, ctx)
            };
            if matched {
                *bindings = trial;
                return true;
            }
            return false;
        }
    }
    pattern.equals(target)
}

/// Deterministic left-to-right backtracking over an ordered argument list:
/// fixed positions consume one target each, sequence positions greedily
/// extend and shrink on backtrack (spec.md step 4).
fn match_sequence<A: AttributeLookup, I: StringLookup>(
    pats: &[Expr],
    targets: &[Expr],
    bindings: &mut Bindings,
    ctx: &MatchContext<A, I>,
) -> bool {
    let Some((p0, rest)) = pats.split_first() else {
        return targets.is_empty();
    };
    match analyze(p0, ctx.canon) {
        Shape::Fixed => {
            let Some((t0, trest)) = targets.split_first() else {
                return false;
            };
            let mut trial = bindings.clone();
            if match_single(p0, t0, &mut trial, ctx) && match_sequence(rest, trest, &mut trial, ctx) {
                *bindings = trial;
                return true;
            }
            false
        }
        Shape::Sequence {
            min,
            type_filter,
            bind_name,
        } => {
            // Greedy: try the longest consumption first, shrink on backtrack.
            let max = targets.len();
            if max < min {
                return false;
            }
            for k in (min..=max).rev() {
                let slice = &targets[..k];
                if !slice
                    .iter()
                    .all(|e| classifier_matches(e, type_filter.as_ref(), ctx.classifiers, ctx.interner))
                {
                    continue;
                }
                let mut trial = bindings.clone();
                if let Some(name) = bind_name {
                    if !trial.bind(name, Binding::Sequence(slice.to_vec())) {
                        continue;
                    }
                }
                if match_sequence(rest, &targets[k..], &mut trial, ctx) {
                    *bindings = trial;
                    return true;
                }
            }
            false
        }
    }
}

/// Orderless matching: targets may be assigned to fixed pattern positions
/// in any order, and sequence positions may absorb any remaining subset.
/// Pattern positions are still processed left-to-right (so specificity and
/// determinism are preserved) but each may draw from any unused target
/// index; this is the permutation search spec.md step 6 describes, bounded
/// by the number of remaining unmatched targets at each step.
fn match_orderless<A: AttributeLookup, I: StringLookup>(
    pats: &[Expr],
    targets: &[Expr],
    bindings: &mut Bindings,
    ctx: &MatchContext<A, I>,
) -> bool {
    let pool: Vec<usize> = (0..targets.len()).collect();
    match_orderless_pool(pats, &pool, targets, bindings, ctx)
}

fn match_orderless_pool<A: AttributeLookup, I: StringLookup>(
    pats: &[Expr],
    pool: &[usize],
    targets: &[Expr],
    bindings: &mut Bindings,
    ctx: &MatchContext<A, I>,
) -> bool {
    let Some((p0, rest)) = pats.split_first() else {
        return pool.is_empty();
    };
    match analyze(p0, ctx.canon) {
        Shape::Fixed => {
            for (pos, &idx) in pool.iter().enumerate() {
                let mut trial = bindings.clone();
                if match_single(p0, &targets[idx], &mut trial, ctx) {
                    let mut remaining = pool.to_vec();
                    remaining.remove(pos);
                    if match_orderless_pool(rest, &remaining, targets, &mut trial, ctx) {
                        *bindings = trial;
                        return true;
                    }
                }
            }
            false
        }
        Shape::Sequence {
            min,
            type_filter,
            bind_name,
        } => {
            for k in (min..=pool.len()).rev() {
                for combo in combinations(pool, k) {
                    let elems: Vec<Expr> = combo.iter().map(|&idx| targets[idx].clone()).collect();
                    if !elems
                        .iter()
                        .all(|e| classifier_matches(e, type_filter.as_ref(), ctx.classifiers, ctx.interner))
                    {
                        continue;
                    }
                    let mut trial = bindings.clone();
                    if let Some(name) = bind_name {
                        if !trial.bind(name, Binding::Sequence(elems)) {
                            continue;
                        }
                    }
                    let remaining: Vec<usize> =
                        pool.iter().copied().filter(|i| !combo.contains(i)).collect();
                    if match_orderless_pool(rest, &remaining, targets, &mut trial, ctx) {
                        *bindings = trial;
                        return true;
                    }
                }
            }
            false
        }
    }
}

/// All size-`k` subsets of `pool`, each preserving `pool`'s relative order,
/// in ascending lexicographic order of index.
fn combinations(pool: &[usize], k: usize) -> Vec<Vec<usize>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if k > pool.len() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for i in 0..=pool.len() - k {
        for mut tail in combinations(&pool[i + 1..], k - 1) {
            tail.insert(0, pool[i]);
            out.push(tail);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::NoAttributes;
    use rf_ir::StringInterner;

    fn ctx<'a>(
        interner: &'a StringInterner,
        canon: &'a CanonNames,
        classifiers: &'a ClassifierNames,
    ) -> MatchContext<'a, NoAttributes, StringInterner> {
        MatchContext {
            canon,
            classifiers,
            attrs: &NoAttributes,
            interner,
        }
    }

    #[test]
    fn literal_atoms_match_only_when_equal() {
        let interner = StringInterner::new();
        let canon = CanonNames::new(&interner);
        let classifiers = ClassifierNames::new(&interner);
        let c = ctx(&interner, &canon, &classifiers);
        assert!(test_match(&Expr::integer(3), &Expr::integer(3), &c));
        assert!(!test_match(&Expr::integer(3), &Expr::integer(4), &c));
    }

    #[test]
    fn bare_blank_matches_anything() {
        let interner = StringInterner::new();
        let canon = CanonNames::new(&interner);
        let classifiers = ClassifierNames::new(&interner);
        let c = ctx(&interner, &canon, &classifiers);
        let pattern = rf_ir::canon::anonymous_blank(&canon, None);
        assert!(test_match(&pattern, &Expr::integer(5), &c));
        assert!(test_match(&pattern, &Expr::string("hi"), &c));
    }

    #[test]
    fn typed_blank_rejects_wrong_classifier() {
        let interner = StringInterner::new();
        let canon = CanonNames::new(&interner);
        let classifiers = ClassifierNames::new(&interner);
        let c = ctx(&interner, &canon, &classifiers);
        let int_ty = interner.intern("Integer");
        let pattern = rf_ir::canon::anonymous_blank(&canon, Some(Expr::Symbol(int_ty)));
        assert!(test_match(&pattern, &Expr::integer(5), &c));
        assert!(!test_match(&pattern, &Expr::string("hi"), &c));
    }

    #[test]
    fn named_pattern_binds_and_checks_consistency() {
        let interner = StringInterner::new();
        let canon = CanonNames::new(&interner);
        let classifiers = ClassifierNames::new(&interner);
        let c = ctx(&interner, &canon, &classifiers);
        let x = interner.intern("x");
        let plus = interner.intern("Plus");
        let pattern = Expr::call(
            plus,
            vec![
                rf_ir::canon::named_blank(&canon, x, None),
                rf_ir::canon::named_blank(&canon, x, None),
            ],
        );
        let matches = Expr::call(plus, vec![Expr::integer(7), Expr::integer(7)]);
        let mismatches = Expr::call(plus, vec![Expr::integer(7), Expr::integer(8)]);
        assert!(test_match(&pattern, &matches, &c));
        assert!(!test_match(&pattern, &mismatches, &c));
    }

    #[test]
    fn blank_sequence_consumes_one_or_more_trailing_args() {
        let interner = StringInterner::new();
        let canon = CanonNames::new(&interner);
        let classifiers = ClassifierNames::new(&interner);
        let c = ctx(&interner, &canon, &classifiers);
        let plus = interner.intern("Plus");
        let x = interner.intern("x");
        let y = interner.intern("y");
        let pattern = Expr::call(
            plus,
            vec![
                rf_ir::canon::named_blank(&canon, x, None),
                rf_ir::canon::named_blank_sequence(&canon, y, None),
            ],
        );
        let target = Expr::call(plus, vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]);
        let bindings = match_expr(&pattern, &target, &c).expect("should match");
        match bindings.get(y) {
            Some(Binding::Sequence(v)) => assert_eq!(v.len(), 2),
            other => panic!("unexpected binding {other:?}"),
        }
    }

    #[test]
    fn blank_sequence_requires_at_least_one_element() {
        let interner = StringInterner::new();
        let canon = CanonNames::new(&interner);
        let classifiers = ClassifierNames::new(&interner);
        let c = ctx(&interner, &canon, &classifiers);
        let pattern = rf_ir::canon::named_blank_sequence(&canon, interner.intern("y"), None);
        let empty_list = Expr::call(canon.list, vec![]);
        // Matching __ against a zero-arg List directly: there is exactly
        // one target overall (the List itself) so it still matches that one
        // expression, not its (empty) contents.
        assert!(test_match(&pattern, &empty_list, &c));
    }

    #[test]
    fn blank_null_sequence_can_consume_zero_elements() {
        let interner = StringInterner::new();
        let canon = CanonNames::new(&interner);
        let classifiers = ClassifierNames::new(&interner);
        let c = ctx(&interner, &canon, &classifiers);
        let plus = interner.intern("Plus");
        let x = interner.intern("x");
        let rest = interner.intern("rest");
        let pattern = Expr::call(
            plus,
            vec![
                rf_ir::canon::named_blank(&canon, x, None),
                rf_ir::canon::named_blank_null_sequence(&canon, rest, None),
            ],
        );
        let target = Expr::call(plus, vec![Expr::integer(1)]);
        let bindings = match_expr(&pattern, &target, &c).expect("should match");
        match bindings.get(rest) {
            Some(Binding::Sequence(v)) => assert!(v.is_empty()),
            other => panic!("unexpected binding {other:?}"),
        }
    }

    struct OrderlessPlus;
    impl AttributeLookup for OrderlessPlus {
        fn attributes_of(&self, _head: Name) -> Attributes {
            Attributes::ORDERLESS
        }
    }

    #[test]
    fn orderless_head_matches_regardless_of_argument_order() {
        let interner = StringInterner::new();
        let canon = CanonNames::new(&interner);
        let classifiers = ClassifierNames::new(&interner);
        let attrs = OrderlessPlus;
        let c = MatchContext {
            canon: &canon,
            classifiers: &classifiers,
            attrs: &attrs,
            interner: &interner,
        };
        let plus = interner.intern("Plus");
        let x = interner.intern("x");
        let pattern = Expr::call(
            plus,
            vec![Expr::integer(1), rf_ir::canon::named_blank(&canon, x, None)],
        );
        let target = Expr::call(plus, vec![Expr::integer(2), Expr::integer(1)]);
        let bindings = match_expr(&pattern, &target, &c).expect("should match");
        assert_eq!(bindings.get(x), Some(&Binding::Single(Expr::integer(2))));
    }

    #[test]
    fn head_mismatch_fails_without_panicking() {
        let interner = StringInterner::new();
        let canon = CanonNames::new(&interner);
        let classifiers = ClassifierNames::new(&interner);
        let c = ctx(&interner, &canon, &classifiers);
        let plus = interner.intern("Plus");
        let times = interner.intern("Times");
        let pattern = Expr::call(plus, vec![Expr::integer(1)]);
        let target = Expr::call(times, vec![Expr::integer(1)]);
        assert!(!test_match(&pattern, &target, &c));
    }

    #[test]
    fn combinations_enumerates_all_subsets_in_order() {
        let pool = vec![0, 1, 2];
        let combos = combinations(&pool, 2);
        assert_eq!(combos, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    }

}
