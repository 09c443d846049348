//! RAII save/restore for `Block`/`With`/`Module`/`Function` application.
//!
//! All four bind symbols by temporarily overwriting their own-value in the
//! (single, global) symbol table and restoring the prior value on exit —
//! including an error exit, since `Drop` runs regardless of how the scope
//! is left. Grounded on the teacher's `ScopedInterpreter`
//! (`ori_eval::interpreter::scope_guard`), adapted from an environment
//! push/pop stack to direct own-value save/restore since this evaluator
//! has no separate per-call environment frame (§ design note in
//! `context.rs`).

use rf_ir::{Expr, Name};

use crate::context::Context;

pub struct ScopeGuard<'ctx> {
    ctx: &'ctx mut Context,
    saved: Vec<(Name, Option<Expr>)>,
}

impl<'ctx> ScopeGuard<'ctx> {
    pub fn new(ctx: &'ctx mut Context) -> Self {
        ScopeGuard {
            ctx,
            saved: Vec::new(),
        }
    }

    /// Save `name`'s current own-value, then set it to `value` (or clear it
    /// if `None`, matching a `Block` binding that names a symbol with no
    /// initializer).
    pub fn bind(&mut self, name: Name, value: Option<Expr>) {
        let prior = self.ctx.symbols.own_value(name).cloned();
        self.saved.push((name, prior));
        self.ctx.symbols.set_own_value(name, value);
    }

    pub fn ctx(&mut self) -> &mut Context {
        self.ctx
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        for (name, prior) in self.saved.drain(..).rev() {
            self.ctx.symbols.set_own_value(name, prior);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_restore_on_drop() {
        let mut ctx = Context::new();
        let x = ctx.interner.intern("x");
        ctx.symbols.set_own_value(x, Some(Expr::integer(1)));
        {
            let mut guard = ScopeGuard::new(&mut ctx);
            guard.bind(x, Some(Expr::integer(99)));
            assert_eq!(guard.ctx().symbols.own_value(x), Some(&Expr::integer(99)));
        }
        assert_eq!(ctx.symbols.own_value(x), Some(&Expr::integer(1)));
    }

    #[test]
    fn binding_a_previously_unset_symbol_clears_it_again() {
        let mut ctx = Context::new();
        let y: Name = ctx.interner.intern("y");
        {
            let mut guard = ScopeGuard::new(&mut ctx);
            guard.bind(y, Some(Expr::integer(5)));
        }
        assert_eq!(ctx.symbols.own_value(y), None);
    }

    #[test]
    fn nested_bindings_of_the_same_symbol_restore_in_order() {
        let mut ctx = Context::new();
        let x = ctx.interner.intern("x");
        ctx.symbols.set_own_value(x, Some(Expr::integer(1)));
        {
            let mut outer = ScopeGuard::new(&mut ctx);
            outer.bind(x, Some(Expr::integer(2)));
            {
                let mut inner = ScopeGuard::new(outer.ctx());
                inner.bind(x, Some(Expr::integer(3)));
                assert_eq!(inner.ctx().symbols.own_value(x), Some(&Expr::integer(3)));
            }
            assert_eq!(outer.ctx().symbols.own_value(x), Some(&Expr::integer(2)));
        }
        assert_eq!(ctx.symbols.own_value(x), Some(&Expr::integer(1)));
    }
}
