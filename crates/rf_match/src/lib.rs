//! Pattern matching over `rf_ir::Expr` trees: blanks, sequence
//! backtracking, consistency checking, Orderless permutation search, and
//! pattern specificity scoring.
//!
//! This crate has no notion of a symbol table or evaluation; it asks about
//! attributes only through `AttributeLookup`, which `rf_eval`'s symbol
//! table implements.

pub mod attrs;
pub mod bindings;
pub mod matcher;
pub mod shape;
pub mod specificity;

pub use attrs::{AttributeLookup, NoAttributes};
pub use bindings::{Binding, Bindings};
pub use matcher::{match_expr, test_match, MatchContext};
pub use specificity::{specificity, Specificity};
