//! The pure-operator kernel (spec.md §4.4): every builtin is registered as
//! a single variadic `head(args___)` down-value so the matcher's only job
//! is "does this head apply at all" — each native function does its own
//! arity/type extraction against the raw argument slice and returns `None`
//! to fall back to a symbolic, unevaluated call when the shape doesn't fit.

mod arithmetic;
mod association;
mod comparison;
mod format;
mod logical;
mod predicates;
mod sequence;

use rf_ir::{Attributes, Expr};

use crate::context::Context;

fn register_variadic(ctx: &mut Context, name: &str, f: fn(&Context, &[Expr]) -> Option<Expr>) {
    let head = ctx.interner.intern(name);
    let args_var = ctx.interner.intern("args");
    let pattern = Expr::call(head, vec![rf_ir::canon::named_blank_null_sequence(&ctx.canon, args_var, None)]);
    ctx.symbols.register_native(head, pattern, f, &ctx.canon);
}

pub fn install_builtins(ctx: &mut Context) {
    register_variadic(ctx, "Plus", arithmetic::plus);
    register_variadic(ctx, "Times", arithmetic::times);
    register_variadic(ctx, "Subtract", arithmetic::subtract);
    register_variadic(ctx, "Divide", arithmetic::divide);
    register_variadic(ctx, "Power", arithmetic::power);
    register_variadic(ctx, "Minus", arithmetic::minus);
    register_variadic(ctx, "Mod", arithmetic::modulo);
    register_variadic(ctx, "Quotient", arithmetic::quotient);
    register_variadic(ctx, "Min", arithmetic::min);
    register_variadic(ctx, "Max", arithmetic::max);

    register_variadic(ctx, "Equal", comparison::equal);
    register_variadic(ctx, "Unequal", comparison::unequal);
    register_variadic(ctx, "Less", comparison::less);
    register_variadic(ctx, "Greater", comparison::greater);
    register_variadic(ctx, "LessEqual", comparison::less_equal);
    register_variadic(ctx, "GreaterEqual", comparison::greater_equal);
    register_variadic(ctx, "SameQ", comparison::same_q);
    register_variadic(ctx, "UnsameQ", comparison::unsame_q);

    register_variadic(ctx, "IntegerQ", predicates::integer_q);
    register_variadic(ctx, "FloatQ", predicates::float_q);
    register_variadic(ctx, "NumberQ", predicates::number_q);
    register_variadic(ctx, "StringQ", predicates::string_q);
    register_variadic(ctx, "BooleanQ", predicates::boolean_q);
    register_variadic(ctx, "SymbolQ", predicates::symbol_q);
    register_variadic(ctx, "ListQ", predicates::list_q);
    register_variadic(ctx, "AtomQ", predicates::atom_q);
    register_variadic(ctx, "TrueQ", predicates::true_q);
    register_variadic(ctx, "AssociationQ", predicates::association_q);

    register_variadic(ctx, "Length", sequence::length);
    register_variadic(ctx, "First", sequence::first);
    register_variadic(ctx, "Last", sequence::last);
    register_variadic(ctx, "Rest", sequence::rest);
    register_variadic(ctx, "Most", sequence::most);
    register_variadic(ctx, "Part", sequence::part);
    register_variadic(ctx, "Take", sequence::take);
    register_variadic(ctx, "Drop", sequence::drop);
    register_variadic(ctx, "RotateLeft", sequence::rotate_left);
    register_variadic(ctx, "RotateRight", sequence::rotate_right);
    register_variadic(ctx, "Reverse", sequence::reverse);
    register_variadic(ctx, "Flatten", sequence::flatten);
    register_variadic(ctx, "Sort", sequence::sort);
    register_variadic(ctx, "Append", sequence::append);
    register_variadic(ctx, "StringJoin", sequence::string_join);
    register_variadic(ctx, "StringLength", sequence::string_length);
    register_variadic(ctx, "StringTake", sequence::string_take);
    register_variadic(ctx, "StringDrop", sequence::string_drop);

    register_variadic(ctx, "Keys", association::keys);
    register_variadic(ctx, "Values", association::values);
    register_variadic(ctx, "Association", association::association);
    register_variadic(ctx, "Lookup", association::lookup);

    register_variadic(ctx, "Not", logical::not);
    register_variadic(ctx, "Boole", logical::boole);

    register_variadic(ctx, "FullForm", format::full_form);
    register_variadic(ctx, "InputForm", format::input_form);
    register_variadic(ctx, "Head", format::head);

    install_attributes(ctx);
    install_constants(ctx);
}

/// Attribute set-up for both kernel operators (needed by the generic
/// evaluation pipeline's Orderless/Flat/Hold steps) and the special forms
/// (needed so `Attributes[And]` etc. reports correctly, even though the
/// hold behavior for special forms is hardcoded in `special_forms::dispatch`
/// rather than driven by this table).
fn install_attributes(ctx: &mut Context) {
    let variadic_numeric = Attributes::ORDERLESS | Attributes::FLAT | Attributes::ONE_IDENTITY;
    for name in ["Plus", "Times"] {
        let n = ctx.interner.intern(name);
        ctx.symbols.set_attributes(n, variadic_numeric | Attributes::NUMERIC_FUNCTION);
    }
    for name in ["Min", "Max"] {
        let n = ctx.interner.intern(name);
        ctx.symbols.set_attributes(n, variadic_numeric);
    }

    let hold_all = [
        "Hold",
        "And",
        "Or",
        "SetDelayed",
        "CompoundExpression",
        "Block",
        "With",
        "Module",
        "Function",
        "Table",
        "Do",
        "Assert",
        "Pattern",
        "Blank",
        "BlankSequence",
        "BlankNullSequence",
    ];
    for name in hold_all {
        let n = ctx.interner.intern(name);
        ctx.symbols.set_attributes(n, Attributes::HOLD_ALL);
    }

    let hold_first = ["Set", "Unset", "Attributes", "SetAttributes", "ClearAttributes"];
    for name in hold_first {
        let n = ctx.interner.intern(name);
        ctx.symbols.set_attributes(n, Attributes::HOLD_FIRST);
    }

    let hold_rest = ["If", "RuleDelayed"];
    for name in hold_rest {
        let n = ctx.interner.intern(name);
        ctx.symbols.set_attributes(n, Attributes::HOLD_REST);
    }

    for name in ["Pi", "E", "True", "False"] {
        let n = ctx.interner.intern(name);
        let existing = ctx.symbols.attributes(n);
        ctx.symbols.set_attributes(n, existing | Attributes::PROTECTED | Attributes::CONSTANT);
    }
}

fn install_constants(ctx: &mut Context) {
    let pi = ctx.interner.intern("Pi");
    ctx.symbols.set_own_value(pi, Some(Expr::real(std::f64::consts::PI)));
    let e = ctx.interner.intern("E");
    ctx.symbols.set_own_value(e, Some(Expr::real(std::f64::consts::E)));
    let true_sym = ctx.interner.intern("True");
    ctx.symbols.set_own_value(true_sym, Some(Expr::boolean(true)));
    let false_sym = ctx.interner.intern("False");
    ctx.symbols.set_own_value(false_sym, Some(Expr::boolean(false)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_builtins_registers_plus_as_orderless_and_flat() {
        let ctx = Context::new();
        let plus = ctx.interner.intern("Plus");
        let attrs = ctx.symbols.attributes(plus);
        assert!(attrs.contains(Attributes::ORDERLESS));
        assert!(attrs.contains(Attributes::FLAT));
    }

    #[test]
    fn pattern_family_symbols_are_hold_all_with_no_down_values() {
        let ctx = Context::new();
        let pattern = ctx.interner.intern("Pattern");
        assert!(ctx.symbols.attributes(pattern).contains(Attributes::HOLD_ALL));
        assert!(ctx.symbols.get(pattern).map_or(true, |e| e.down_values.is_empty()));
    }

    #[test]
    fn pi_is_protected_and_constant() {
        let ctx = Context::new();
        let pi = ctx.interner.intern("Pi");
        let attrs = ctx.symbols.attributes(pi);
        assert!(attrs.contains(Attributes::PROTECTED));
        assert!(attrs.contains(Attributes::CONSTANT));
    }

    #[test]
    fn true_and_false_are_protected_bool_own_values() {
        let ctx = Context::new();
        let true_sym = ctx.interner.intern("True");
        let false_sym = ctx.interner.intern("False");
        let attrs = ctx.symbols.attributes(true_sym);
        assert!(attrs.contains(Attributes::PROTECTED));
        assert!(attrs.contains(Attributes::CONSTANT));
        assert_eq!(ctx.symbols.own_value(true_sym), Some(&Expr::boolean(true)));
        assert_eq!(ctx.symbols.own_value(false_sym), Some(&Expr::boolean(false)));
    }
}
