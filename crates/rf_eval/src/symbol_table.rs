//! Per-symbol state: evaluation attributes, an own-value, and an ordered
//! down-value rule list (spec.md §4.3).

use rf_ir::{Attributes, CanonNames, Expr, Name};
use rf_match::{specificity, AttributeLookup, Specificity};

use crate::context::Context;

/// A single entry in a symbol's down-value list: either a builtin's native
/// implementation or a user rule installed by `Set`/`SetDelayed`.
pub enum RuleBody {
    /// Extracts typed arguments from the pre-matched, already-evaluated
    /// argument list and computes a result natively. Returning `None`
    /// means "leave the call unchanged" (symbolic passthrough) — not a
    /// failure, just "this wrapper didn't have enough type information to
    /// act". Takes `&Context` (read-only) so a wrapper can build an
    /// `Expr::Error` through the shared interner or consult `CanonNames`.
    Native(fn(&Context, &[Expr]) -> Option<Expr>),
    /// Installed by `Set` or `SetDelayed` alike: dispatch applies both the
    /// same way (substitute, then let the evaluator's fixed-point loop
    /// re-evaluate). The two differ only at install time in whether the
    /// right-hand side was pre-evaluated before being stored here.
    User { body: Expr },
}

pub struct Rule {
    pub pattern: Expr,
    pub body: RuleBody,
    specificity: Specificity,
    insertion_order: u64,
}

#[derive(Default)]
pub struct SymbolEntry {
    pub attributes: Attributes,
    pub own_value: Option<Expr>,
    pub down_values: Vec<Rule>,
}

impl SymbolEntry {
    /// Insert `rule` at its specificity-determined position. A pattern
    /// structurally equal to an existing one replaces that entry in place
    /// rather than appending a second copy (spec.md §4.3).
    fn insert_rule(&mut self, pattern: Expr, body: RuleBody, names: &CanonNames, next_seq: &mut u64) {
        let spec = specificity(&pattern, names);
        if let Some(existing) = self.down_values.iter_mut().find(|r| r.pattern.equals(&pattern)) {
            existing.body = body;
            existing.specificity = spec;
            return;
        }
        let order = *next_seq;
        *next_seq += 1;
        let rule = Rule {
            pattern,
            body,
            specificity: spec,
            insertion_order: order,
        };
        let pos = self
            .down_values
            .iter()
            .position(|r| rule_order(&rule, r) == std::cmp::Ordering::Less)
            .unwrap_or(self.down_values.len());
        self.down_values.insert(pos, rule);
    }
}

/// More specific first; earlier insertion wins ties.
fn rule_order(a: &Rule, b: &Rule) -> std::cmp::Ordering {
    b.specificity
        .cmp(&a.specificity)
        .then(a.insertion_order.cmp(&b.insertion_order))
}

pub struct SymbolTable {
    entries: rustc_hash::FxHashMap<Name, SymbolEntry>,
    next_seq: u64,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: rustc_hash::FxHashMap::default(),
            next_seq: 0,
        }
    }

    pub fn entry(&mut self, name: Name) -> &mut SymbolEntry {
        self.entries.entry(name).or_default()
    }

    pub fn get(&self, name: Name) -> Option<&SymbolEntry> {
        self.entries.get(&name)
    }

    pub fn attributes(&self, name: Name) -> Attributes {
        self.entries.get(&name).map(|e| e.attributes).unwrap_or_default()
    }

    pub fn set_attributes(&mut self, name: Name, attrs: Attributes) {
        self.entry(name).attributes = attrs;
    }

    pub fn own_value(&self, name: Name) -> Option<&Expr> {
        self.entries.get(&name).and_then(|e| e.own_value.as_ref())
    }

    pub fn set_own_value(&mut self, name: Name, value: Option<Expr>) {
        self.entry(name).own_value = value;
    }

    /// Register a builtin. Builtins are ordered purely by specificity
    /// (insertion order among builtins shouldn't matter; they're installed
    /// once at startup in a fixed sequence so ties still resolve
    /// deterministically).
    pub fn register_native(&mut self, head: Name, pattern: Expr, f: fn(&Context, &[Expr]) -> Option<Expr>, names: &CanonNames) {
        let seq = &mut self.next_seq;
        self.entries
            .entry(head)
            .or_default()
            .insert_rule(pattern, RuleBody::Native(f), names, seq);
    }

    /// Install a user rule from `Set`/`SetDelayed`.
    pub fn install_rule(&mut self, head: Name, pattern: Expr, body: Expr, names: &CanonNames) {
        let seq = &mut self.next_seq;
        self.entries
            .entry(head)
            .or_default()
            .insert_rule(pattern, RuleBody::User { body }, names, seq);
    }

    pub fn clear_down_values(&mut self, name: Name) {
        if let Some(entry) = self.entries.get_mut(&name) {
            entry.down_values.clear();
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeLookup for SymbolTable {
    fn attributes_of(&self, head: Name) -> Attributes {
        self.attributes(head)
    }
}
