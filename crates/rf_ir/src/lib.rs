//! Expression model and canonical forms.
//!
//! This crate owns the one representation every later stage agrees on: the
//! `Expr` tree, interned symbol `Name`s, the `Heap<T>` sharing wrapper,
//! evaluation `Attributes`, and the sugar-to-canonical-form constructors a
//! front end would call. It does no matching and no evaluation — those are
//! `rf_match` and `rf_eval`.

pub mod attributes;
pub mod canon;
pub mod expr;
pub mod format;
pub mod heap;
pub mod name;

pub use attributes::Attributes;
pub use canon::CanonNames;
pub use expr::{AssocData, ClassifierNames, ErrorData, Expr};
pub use heap::Heap;
pub use name::{Name, SharedInterner, StringInterner, StringLookup};
