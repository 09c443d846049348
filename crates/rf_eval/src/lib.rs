//! Symbol table, rule dispatch, pure-operator kernel, evaluator pipeline,
//! and special forms: everything that turns an `rf_ir::Expr` tree and a
//! `rf_match` pattern matcher into a running rewrite engine.

pub mod context;
pub mod errors;
pub mod eval;
pub mod kernel;
pub mod scope;
pub mod special_forms;
pub mod substitute;
pub mod symbol_table;

pub use context::Context;
pub use eval::evaluate;
