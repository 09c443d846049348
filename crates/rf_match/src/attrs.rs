//! Decouples the matcher from the symbol table.
//!
//! `rf_eval` owns the symbol table (attributes live there), but Orderless
//! matching needs to know whether the target's head carries `Orderless`.
//! Rather than pull `rf_eval` in as a dependency of `rf_match` (it's the
//! other way around), the matcher asks through this trait.

use rf_ir::{Attributes, Name};

pub trait AttributeLookup {
    fn attributes_of(&self, head: Name) -> Attributes;
}

/// A lookup that reports no attributes for any symbol, for tests and for
/// matching contexts (like a bare `MatchQ` with no surrounding evaluator)
/// that don't need Orderless/Flat awareness.
pub struct NoAttributes;

impl AttributeLookup for NoAttributes {
    fn attributes_of(&self, _head: Name) -> Attributes {
        Attributes::empty()
    }
}
