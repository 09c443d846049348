//! `Context`: the one mutable object the evaluator threads through every
//! call. Symbol own-values and down-values live directly in its
//! `SymbolTable` — `Block`/`With`/`Module`/`Function` application all work
//! by temporarily overwriting a symbol's own-value and restoring it on
//! exit (dynamic-extent scoping, spec.md §4.6), so there is no separate
//! per-call environment frame to thread and no need to share ownership: a
//! single `&mut Context` is enough. This mirrors the teacher's
//! `Interpreter::new`/builder shape (`ori_eval::interpreter::builder`)
//! without needing its `Arc`-shared environment, since evaluation here
//! never crosses a thread boundary.

use std::time::{Duration, Instant};

use rf_ir::{CanonNames, ClassifierNames, Name, SharedInterner};
use rf_match::{AttributeLookup, MatchContext};

use crate::special_forms::SpecialFormNames;
use crate::symbol_table::SymbolTable;

const DEFAULT_RECURSION_LIMIT: usize = 1024;

pub struct Context {
    pub interner: SharedInterner,
    pub canon: CanonNames,
    pub classifiers: ClassifierNames,
    pub special: SpecialFormNames,
    pub symbols: SymbolTable,
    recursion_depth: usize,
    recursion_limit: usize,
    deadline: Option<Instant>,
    module_counter: u64,
}

impl Context {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_RECURSION_LIMIT, None)
    }

    pub fn with_limits(recursion_limit: usize, wall_clock_timeout: Option<Duration>) -> Self {
        let interner = SharedInterner::new();
        let canon = CanonNames::new(&interner);
        let classifiers = ClassifierNames::new(&interner);
        let special = SpecialFormNames::new(&interner);
        let mut ctx = Context {
            interner,
            canon,
            classifiers,
            special,
            symbols: SymbolTable::new(),
            recursion_depth: 0,
            recursion_limit,
            deadline: wall_clock_timeout.map(|d| Instant::now() + d),
            module_counter: 0,
        };
        crate::kernel::install_builtins(&mut ctx);
        ctx
    }

    /// A fresh symbol distinct from `base` and from every other symbol
    /// this `Context` has ever generated, used by `Module` to rename its
    /// local variables (spec.md §4.6: "Module generates fresh symbol names
    /// for each scope entry").
    pub fn fresh_symbol(&mut self, base: Name) -> Name {
        self.module_counter += 1;
        let base_text = self.interner.resolve(base);
        let generated = format!("{base_text}$module{}", self.module_counter);
        self.interner.intern(&generated)
    }

    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Enter one level of re-evaluation (the fixed-point loop in
    /// spec.md §4.5 step 9, and ordinary recursive descent into
    /// sub-expressions). Returns `false` once the limit is hit.
    #[must_use]
    pub fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= self.recursion_limit {
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    pub fn deadline_exceeded(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Diagnostic hook standing in for the out-of-scope `Print` I/O
    /// primitive: `CompoundExpression` side effects are observable this
    /// way in tests without doing any actual I/O.
    pub fn trace_log(&self, message: &str) {
        tracing::debug!(target: "rulefold::trace", "{message}");
    }

    pub fn match_context(&self) -> MatchContext<'_, SymbolTable, rf_ir::StringInterner> {
        MatchContext {
            canon: &self.canon,
            classifiers: &self.classifiers,
            attrs: &self.symbols,
            interner: &self.interner,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// Re-exported for call sites that only need to check an attribute without
// going through the whole `Context` (e.g. inside a scope guard).
pub fn attributes_of(ctx: &Context, name: rf_ir::Name) -> rf_ir::Attributes {
    ctx.symbols.attributes_of(name)
}
