//! Classifying a pattern position as fixed-arity or a sequence pattern,
//! the distinction the sequence-matching backtracker is built around.

use rf_ir::{CanonNames, Expr, Name};

/// What one position in a pattern argument list consumes from the target
/// sequence.
pub enum Shape {
    /// Consumes exactly one target: a literal, `Blank`/`Blank(T)` (bare or
    /// `Pattern`-wrapped), or a general compound pattern.
    Fixed,
    /// Consumes `min..=len` consecutive targets: `BlankSequence` (min 1) or
    /// `BlankNullSequence` (min 0), bare or `Pattern`-wrapped.
    Sequence {
        min: usize,
        type_filter: Option<Expr>,
        bind_name: Option<Name>,
    },
}

pub fn analyze(pattern: &Expr, names: &CanonNames) -> Shape {
    if let Some((head, args)) = pattern.as_compound() {
        if let Expr::Symbol(h) = head {
            if *h == names.pattern && args.len() == 2 {
                if let Expr::Symbol(var) = &args[0] {
                    if let Some(shape) = sequence_shape(&args[1], names, Some(*var)) {
                        return shape;
                    }
                }
            } else if let Some(shape) = sequence_shape(pattern, names, None) {
                return shape;
            }
        }
    }
    Shape::Fixed
}

fn sequence_shape(expr: &Expr, names: &CanonNames, bind_name: Option<Name>) -> Option<Shape> {
    let (head, args) = expr.as_compound()?;
    let h = match head {
        Expr::Symbol(h) => *h,
        _ => return None,
    };
    let min = if h == names.blank_sequence {
        1
    } else if h == names.blank_null_sequence {
        0
    } else {
        return None;
    };
    Some(Shape::Sequence {
        min,
        type_filter: args.first().cloned(),
        bind_name,
    })
}

/// `Pattern(x, Blank(T))`/`Blank(T)` with an explicit type filter present,
/// used by specificity scoring.
pub fn is_typed_blank(pattern: &Expr, names: &CanonNames) -> bool {
    let inner = strip_pattern_wrapper(pattern, names);
    matches!(inner.as_compound(), Some((Expr::Symbol(h), args)) if *h == names.blank && !args.is_empty())
}

/// A plain literal atom (not a `Blank`/`Pattern`/`BlankSequence` construct
/// at all), used by specificity scoring.
pub fn is_literal(pattern: &Expr, names: &CanonNames) -> bool {
    match pattern {
        Expr::Compound { head, .. } => {
            !matches!(head.as_ref(), Expr::Symbol(h) if *h == names.pattern
                || *h == names.blank
                || *h == names.blank_sequence
                || *h == names.blank_null_sequence)
        }
        _ => true,
    }
}

fn strip_pattern_wrapper<'a>(pattern: &'a Expr, names: &CanonNames) -> &'a Expr {
    if let Some((Expr::Symbol(h), args)) = pattern.as_compound() {
        if *h == names.pattern && args.len() == 2 {
            return &args[1];
        }
    }
    pattern
}
