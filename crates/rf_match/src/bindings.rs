//! The binding environment a successful match produces.

use rustc_hash::FxHashMap;

use rf_ir::{Expr, Name};

/// What a single pattern variable was bound to.
///
/// `Blank`-family patterns bind `Single`; `BlankSequence`/
/// `BlankNullSequence` bind `Sequence` (the raw matched elements, not yet
/// wrapped in any head — re-wrapping for a `Flat` head, or splicing into a
/// rule body, is the evaluator's job at substitution time, not the
/// matcher's).
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    Single(Expr),
    Sequence(Vec<Expr>),
}

impl Binding {
    /// Structural equality used by the consistency check: a repeated
    /// pattern variable must bind to the same value every time.
    fn consistent_with(&self, other: &Binding) -> bool {
        match (self, other) {
            (Binding::Single(a), Binding::Single(b)) => a.equals(b),
            (Binding::Sequence(a), Binding::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            _ => false,
        }
    }
}

/// The environment accumulated while matching. Cloned on every backtracking
/// branch point (matches here are small, so this is simpler than an undo
/// log and still cheap enough).
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    map: FxHashMap<Name, Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings {
            map: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: Name) -> Option<&Binding> {
        self.map.get(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Name, &Binding)> {
        self.map.iter().map(|(&k, v)| (k, v))
    }

    /// Bind `name` to `value`, enforcing consistency with any prior binding
    /// of the same name. Returns `false` (leaving `self` unchanged) on a
    /// conflicting rebind.
    pub fn bind(&mut self, name: Name, value: Binding) -> bool {
        match self.map.get(&name) {
            Some(existing) if !existing.consistent_with(&value) => false,
            Some(_) => true,
            None => {
                self.map.insert(name, value);
                true
            }
        }
    }
}
