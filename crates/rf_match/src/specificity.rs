//! Pattern specificity: a pure function of a pattern's shape, used by the
//! rule store to decide try-order when more than one pattern could match a
//! call (spec.md §4.3). It lives here, not in `rf_eval`, because computing
//! it only needs to look at a pattern's own structure.

use rf_ir::{CanonNames, Expr};

use crate::shape::{analyze, is_literal, is_typed_blank, Shape};

/// Compared lexicographically, most-specific first: more fixed positions,
/// then more typed blanks, then more literals, then greater structural
/// depth. Insertion order is the caller's tie-break (kept outside this
/// struct since it isn't a property of the pattern itself).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    pub fixed_count: usize,
    pub typed_blank_count: usize,
    pub literal_count: usize,
    pub structural_depth: usize,
}

/// `pattern` is the full compound pattern for a rule's LHS, e.g.
/// `H(p1, ..., pn)`. Only the immediate argument positions count toward
/// `fixed_count`/`typed_blank_count`/`literal_count`; `structural_depth`
/// covers the whole pattern tree.
pub fn specificity(pattern: &Expr, names: &CanonNames) -> Specificity {
    let mut fixed_count = 0;
    let mut typed_blank_count = 0;
    let mut literal_count = 0;

    for arg in pattern.args() {
        if let Shape::Fixed = analyze(arg, names) {
            fixed_count += 1;
            if is_typed_blank(arg, names) {
                typed_blank_count += 1;
            }
            if is_literal(arg, names) {
                literal_count += 1;
            }
        }
    }

    Specificity {
        fixed_count,
        typed_blank_count,
        literal_count,
        structural_depth: structural_depth(pattern),
    }
}

fn structural_depth(expr: &Expr) -> usize {
    match expr.as_compound() {
        Some((head, args)) => {
            1 + args
                .iter()
                .map(structural_depth)
                .chain(std::iter::once(structural_depth(head)))
                .max()
                .unwrap_or(0)
        }
        None => 1,
    }
}
