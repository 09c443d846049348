//! Evaluation attributes attached to head symbols.
//!
//! Attributes reshape how the evaluator treats a symbol's arguments and
//! definitions before dispatch ever sees them.

use bitflags::bitflags;

bitflags! {
    /// The fixed attribute set a head symbol can carry.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
    pub struct Attributes: u16 {
        /// Arguments may be reordered by the evaluator's canonical sort.
        const ORDERLESS        = 1 << 0;
        /// Nested calls to the same head are spliced into one argument list.
        const FLAT             = 1 << 1;
        /// A lone remaining argument after Flat/Orderless processing is
        /// returned unwrapped instead of as a single-argument compound.
        const ONE_IDENTITY     = 1 << 2;
        /// Thread element-wise over `List` arguments.
        const LISTABLE         = 1 << 3;
        /// No argument is evaluated before dispatch.
        const HOLD_ALL         = 1 << 4;
        /// The first argument is held; the rest are evaluated.
        const HOLD_FIRST       = 1 << 5;
        /// The first argument is evaluated; the rest are held.
        const HOLD_REST        = 1 << 6;
        /// `Set`/`SetDelayed`/`Unset` on this symbol fail with `Protected`.
        const PROTECTED        = 1 << 7;
        /// The symbol's own-value is a fixed numeric constant (`Pi`, `E`).
        const CONSTANT         = 1 << 8;
        /// Numeric function: reserved for future folding heuristics: the
        /// kernel records it but does not yet branch on it (no spec rule
        /// currently depends on it beyond being readable via `Attributes`).
        const NUMERIC_FUNCTION = 1 << 9;
    }
}

impl Attributes {
    #[inline]
    pub fn holds_all(self) -> bool {
        self.contains(Attributes::HOLD_ALL)
    }

    #[inline]
    pub fn holds_first(self) -> bool {
        self.contains(Attributes::HOLD_FIRST)
    }

    #[inline]
    pub fn holds_rest(self) -> bool {
        self.contains(Attributes::HOLD_REST)
    }

    /// Whether the i-th (0-based) argument position is held from evaluation.
    pub fn holds_position(self, index: usize) -> bool {
        if self.holds_all() {
            return true;
        }
        if self.holds_first() && index == 0 {
            return true;
        }
        if self.holds_rest() && index != 0 {
            return true;
        }
        false
    }
}
