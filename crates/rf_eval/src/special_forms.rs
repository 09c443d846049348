//! The non-standard-evaluation-order heads (spec.md §4.6). Each is
//! dispatched by head symbol *before* the generic attribute-driven
//! pipeline in `eval.rs` ever sees the call.

use rf_ir::{Attributes, Expr, Name};
use rf_match::test_match;

use crate::context::Context;
use crate::errors;
use crate::eval::evaluate;
use crate::scope::ScopeGuard;
use crate::substitute::substitute;

/// Interned names for every special-form head, resolved once per
/// `Context` the same way `CanonNames`/`ClassifierNames` are.
pub struct SpecialFormNames {
    pub hold: Name,
    pub evaluate: Name,
    pub if_: Name,
    pub and: Name,
    pub or: Name,
    pub set: Name,
    pub set_delayed: Name,
    pub unset: Name,
    pub compound_expression: Name,
    pub block: Name,
    pub with: Name,
    pub module: Name,
    pub function: Name,
    pub table: Name,
    pub do_: Name,
    pub replace: Name,
    pub replace_all: Name,
    pub rule_delayed: Name,
    pub match_q: Name,
    pub attributes: Name,
    pub set_attributes: Name,
    pub clear_attributes: Name,
    pub map: Name,
    pub apply: Name,
    pub assert: Name,
    pub sequence: Name,
    pub null: Name,
    pub slot: Name,
    pub rule: Name,
}

impl SpecialFormNames {
    pub fn new(interner: &rf_ir::StringInterner) -> Self {
        SpecialFormNames {
            hold: interner.intern("Hold"),
            evaluate: interner.intern("Evaluate"),
            if_: interner.intern("If"),
            and: interner.intern("And"),
            or: interner.intern("Or"),
            set: interner.intern("Set"),
            set_delayed: interner.intern("SetDelayed"),
            unset: interner.intern("Unset"),
            compound_expression: interner.intern("CompoundExpression"),
            block: interner.intern("Block"),
            with: interner.intern("With"),
            module: interner.intern("Module"),
            function: interner.intern("Function"),
            table: interner.intern("Table"),
            do_: interner.intern("Do"),
            replace: interner.intern("Replace"),
            replace_all: interner.intern("ReplaceAll"),
            rule_delayed: interner.intern("RuleDelayed"),
            match_q: interner.intern("MatchQ"),
            attributes: interner.intern("Attributes"),
            set_attributes: interner.intern("SetAttributes"),
            clear_attributes: interner.intern("ClearAttributes"),
            map: interner.intern("Map"),
            apply: interner.intern("Apply"),
            assert: interner.intern("Assert"),
            sequence: interner.intern("Sequence"),
            null: interner.intern("Null"),
            slot: interner.intern("Slot"),
            rule: interner.intern("Rule"),
        }
    }
}

/// Try each special form by head name. `None` means "not a special form";
/// the caller falls through to the generic attribute-driven pipeline.
pub fn dispatch(ctx: &mut Context, head: Name, args: &[Expr]) -> Option<Expr> {
    let s = &ctx.special;
    if head == s.hold {
        Some(Expr::call(head, args.to_vec()))
    } else if head == s.evaluate {
        Some(eval_evaluate(ctx, args))
    } else if head == s.if_ {
        Some(eval_if(ctx, args))
    } else if head == s.and {
        Some(eval_and(ctx, args))
    } else if head == s.or {
        Some(eval_or(ctx, args))
    } else if head == s.set {
        Some(eval_set(ctx, args))
    } else if head == s.set_delayed {
        Some(eval_set_delayed(ctx, args))
    } else if head == s.unset {
        Some(eval_unset(ctx, args))
    } else if head == s.compound_expression {
        Some(eval_compound_expression(ctx, args))
    } else if head == s.block {
        Some(eval_block(ctx, args))
    } else if head == s.with {
        Some(eval_with(ctx, args))
    } else if head == s.module {
        Some(eval_module(ctx, args))
    } else if head == s.function {
        // Function is self-returning; application is handled separately
        // in `eval.rs` when a Function value is used as a head.
        Some(Expr::call(head, args.to_vec()))
    } else if head == s.table {
        Some(eval_table(ctx, args))
    } else if head == s.do_ {
        Some(eval_do(ctx, args))
    } else if head == s.replace {
        Some(eval_replace(ctx, args))
    } else if head == s.replace_all {
        Some(eval_replace_all(ctx, args))
    } else if head == s.rule_delayed {
        Some(eval_rule_delayed(ctx, args))
    } else if head == s.match_q {
        Some(eval_match_q(ctx, args))
    } else if head == s.attributes {
        Some(eval_attributes(ctx, args))
    } else if head == s.set_attributes {
        Some(eval_set_attributes(ctx, args))
    } else if head == s.clear_attributes {
        Some(eval_clear_attributes(ctx, args))
    } else if head == s.map {
        Some(eval_map(ctx, args))
    } else if head == s.apply {
        Some(eval_apply(ctx, args))
    } else if head == s.assert {
        Some(eval_assert(ctx, args))
    } else {
        None
    }
}

fn eval_evaluate(ctx: &mut Context, args: &[Expr]) -> Expr {
    match args {
        [x] => evaluate(ctx, x),
        _ => errors::argument_error(&ctx.interner, "Evaluate takes exactly one argument", args.to_vec()),
    }
}

fn eval_if(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [cond, then_expr, rest @ ..] = args else {
        return errors::argument_error(&ctx.interner, "If takes 2 or 3 arguments", args.to_vec());
    };
    let cond_val = evaluate(ctx, cond);
    match cond_val {
        Expr::Bool(true) => evaluate(ctx, then_expr),
        Expr::Bool(false) => match rest {
            [else_expr] => evaluate(ctx, else_expr),
            [] => Expr::Symbol(ctx.special.null),
            _ => errors::argument_error(&ctx.interner, "If takes 2 or 3 arguments", args.to_vec()),
        },
        _ => {
            let mut rebuilt = vec![cond_val, then_expr.clone()];
            rebuilt.extend(rest.iter().cloned());
            Expr::call(ctx.special.if_, rebuilt)
        }
    }
}

fn eval_and(ctx: &mut Context, args: &[Expr]) -> Expr {
    for (i, a) in args.iter().enumerate() {
        let v = evaluate(ctx, a);
        match v {
            Expr::Bool(false) => return Expr::Bool(false),
            Expr::Bool(true) => continue,
            _ => {
                let mut remaining = vec![v];
                remaining.extend(args[i + 1..].iter().cloned());
                return Expr::call(ctx.special.and, remaining);
            }
        }
    }
    Expr::Bool(true)
}

fn eval_or(ctx: &mut Context, args: &[Expr]) -> Expr {
    for (i, a) in args.iter().enumerate() {
        let v = evaluate(ctx, a);
        match v {
            Expr::Bool(true) => return Expr::Bool(true),
            Expr::Bool(false) => continue,
            _ => {
                let mut remaining = vec![v];
                remaining.extend(args[i + 1..].iter().cloned());
                return Expr::call(ctx.special.or, remaining);
            }
        }
    }
    Expr::Bool(false)
}

fn eval_set(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [lhs, rhs] = args else {
        return errors::argument_error(&ctx.interner, "Set takes exactly two arguments", args.to_vec());
    };
    let value = evaluate(ctx, rhs);
    match lhs {
        Expr::Symbol(name) => {
            if ctx.symbols.attributes(*name).contains(Attributes::PROTECTED) {
                return errors::protected(&ctx.interner, ctx.interner.resolve(*name));
            }
            ctx.symbols.set_own_value(*name, Some(value.clone()));
            value
        }
        Expr::Compound { head, .. } => {
            let Expr::Symbol(head_name) = head.as_ref() else {
                return errors::argument_error(&ctx.interner, "Set's lhs head must be a symbol", args.to_vec());
            };
            if ctx.symbols.attributes(*head_name).contains(Attributes::PROTECTED) {
                return errors::protected(&ctx.interner, ctx.interner.resolve(*head_name));
            }
            ctx.symbols
                .install_rule(*head_name, lhs.clone(), value.clone(), &ctx.canon);
            value
        }
        _ => errors::argument_error(&ctx.interner, "Set's lhs must be a symbol or compound", args.to_vec()),
    }
}

fn eval_set_delayed(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [lhs, rhs] = args else {
        return errors::argument_error(&ctx.interner, "SetDelayed takes exactly two arguments", args.to_vec());
    };
    match lhs {
        Expr::Symbol(name) => {
            if ctx.symbols.attributes(*name).contains(Attributes::PROTECTED) {
                return errors::protected(&ctx.interner, ctx.interner.resolve(*name));
            }
            ctx.symbols.set_own_value(*name, Some(rhs.clone()));
        }
        Expr::Compound { head, .. } => {
            let Expr::Symbol(head_name) = head.as_ref() else {
                return errors::argument_error(&ctx.interner, "SetDelayed's lhs head must be a symbol", args.to_vec());
            };
            if ctx.symbols.attributes(*head_name).contains(Attributes::PROTECTED) {
                return errors::protected(&ctx.interner, ctx.interner.resolve(*head_name));
            }
            ctx.symbols
                .install_rule(*head_name, lhs.clone(), rhs.clone(), &ctx.canon);
        }
        _ => return errors::argument_error(&ctx.interner, "SetDelayed's lhs must be a symbol or compound", args.to_vec()),
    }
    Expr::Symbol(ctx.special.null)
}

fn eval_unset(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [Expr::Symbol(name)] = args else {
        return errors::argument_error(&ctx.interner, "Unset takes exactly one symbol", args.to_vec());
    };
    if ctx.symbols.attributes(*name).contains(Attributes::PROTECTED) {
        return errors::protected(&ctx.interner, ctx.interner.resolve(*name));
    }
    ctx.symbols.set_own_value(*name, None);
    ctx.symbols.clear_down_values(*name);
    Expr::Symbol(ctx.special.null)
}

fn eval_compound_expression(ctx: &mut Context, args: &[Expr]) -> Expr {
    let mut last = Expr::Symbol(ctx.special.null);
    for a in args {
        last = evaluate(ctx, a);
    }
    last
}

/// Shared Block/With binding logic: each entry is either a bare `Symbol`
/// (clear it for this scope) or `Set(sym, val)` (evaluate `val`, bind
/// `sym`). Returns `None` on a malformed binding list.
fn bind_scope_entries(guard: &mut ScopeGuard, bindings_list: &Expr) -> Option<()> {
    let set_head = guard.ctx().special.set;
    for entry in bindings_list.args() {
        match entry {
            Expr::Symbol(name) => guard.bind(*name, None),
            Expr::Compound { head, args } if matches!(head.as_ref(), Expr::Symbol(h) if *h == set_head) => {
                let [sym, val] = args.as_slice() else {
                    return None;
                };
                let Expr::Symbol(name) = sym else {
                    return None;
                };
                let value = evaluate(guard.ctx(), val);
                guard.bind(*name, Some(value));
            }
            _ => return None,
        }
    }
    Some(())
}

fn eval_block(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [bindings_list, body] = args else {
        return errors::argument_error(&ctx.interner, "Block takes exactly two arguments", args.to_vec());
    };
    let mut guard = ScopeGuard::new(ctx);
    if bind_scope_entries(&mut guard, bindings_list).is_none() {
        return errors::argument_error(&guard.ctx().interner, "malformed Block binding list", args.to_vec());
    }
    evaluate(guard.ctx(), body)
}

fn eval_with(ctx: &mut Context, args: &[Expr]) -> Expr {
    // With binds constants; save/restore semantics are identical to Block.
    eval_block(ctx, args)
}

fn eval_module(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [bindings_list, body] = args else {
        return errors::argument_error(&ctx.interner, "Module takes exactly two arguments", args.to_vec());
    };
    // Generate a fresh symbol per declared local and rewrite every
    // occurrence of the original name in both the initializer list and the
    // body, so Module locals never collide with a same-named global.
    let mut renames: Vec<(Name, Name)> = Vec::new();
    for entry in bindings_list.args() {
        let original = match entry {
            Expr::Symbol(name) => *name,
            Expr::Compound { head, args } if matches!(head.as_ref(), Expr::Symbol(h) if *h == ctx.special.set) => {
                match args.as_slice() {
                    [Expr::Symbol(name), _] => *name,
                    _ => return errors::argument_error(&ctx.interner, "malformed Module binding list", args.to_vec()),
                }
            }
            _ => return errors::argument_error(&ctx.interner, "malformed Module binding list", args.to_vec()),
        };
        renames.push((original, ctx.fresh_symbol(original)));
    }

    let renamed_bindings = rename_symbols(bindings_list, &renames);
    let renamed_body = rename_symbols(body, &renames);
    eval_block(ctx, &[renamed_bindings, renamed_body])
}

fn rename_symbols(expr: &Expr, renames: &[(Name, Name)]) -> Expr {
    match expr {
        Expr::Symbol(name) => {
            match renames.iter().find(|(from, _)| from == name) {
                Some((_, to)) => Expr::Symbol(*to),
                None => expr.clone(),
            }
        }
        Expr::Compound { head, args } => Expr::compound(
            rename_symbols(head, renames),
            args.iter().map(|a| rename_symbols(a, renames)).collect(),
        ),
        _ => expr.clone(),
    }
}

/// Apply a `Function` value to actual arguments: `Function([x,y], body)(a,b)`
/// binds `x`/`y` to `a`/`b` in a fresh scope; `Function(body)` uses
/// `$1..$n` slots, with `$` aliasing `$1`.
pub fn apply_function(ctx: &mut Context, function_expr: &Expr, call_args: &[Expr]) -> Expr {
    let fn_args = function_expr.args();
    match fn_args {
        [params, body] => {
            let Some((_, param_names)) = params.as_compound() else {
                return errors::argument_error(&ctx.interner, "Function's parameter list must be a List", call_args.to_vec());
            };
            if param_names.len() != call_args.len() {
                return errors::argument_error(
                    &ctx.interner,
                    "Function arity mismatch",
                    call_args.to_vec(),
                );
            }
            let mut guard = ScopeGuard::new(ctx);
            for (p, a) in param_names.iter().zip(call_args.iter()) {
                let Expr::Symbol(name) = p else {
                    return errors::argument_error(&guard.ctx().interner, "Function parameters must be symbols", call_args.to_vec());
                };
                let value = evaluate(guard.ctx(), a);
                guard.bind(*name, Some(value));
            }
            evaluate(guard.ctx(), body)
        }
        [body] => {
            let evaluated_args: Vec<Expr> = call_args.iter().map(|a| evaluate(ctx, a)).collect();
            substitute_slots(ctx, body, &evaluated_args)
        }
        _ => errors::argument_error(&ctx.interner, "Function takes one or two arguments", call_args.to_vec()),
    }
}

fn substitute_slots(ctx: &Context, body: &Expr, actual_args: &[Expr]) -> Expr {
    match body {
        Expr::Compound { head, args } if matches!(head.as_ref(), Expr::Symbol(h) if *h == ctx.special.slot) => {
            let index = match args.as_slice() {
                [] => 1,
                [Expr::Integer(n)] => *n,
                _ => return body.clone(),
            };
            actual_args
                .get((index - 1).max(0) as usize)
                .cloned()
                .unwrap_or(Expr::Symbol(ctx.special.null))
        }
        Expr::Compound { head, args } => Expr::compound(
            substitute_slots(ctx, head, actual_args),
            args.iter().map(|a| substitute_slots(ctx, a, actual_args)).collect(),
        ),
        _ => body.clone(),
    }
}

struct IterationStep {
    binding: Option<(Name, Expr)>,
}

fn parse_iterator(ctx: &mut Context, spec: &Expr) -> Option<Vec<IterationStep>> {
    match spec {
        Expr::Integer(n) => {
            let count = usize::try_from(*n).ok()?;
            Some((0..count).map(|_| IterationStep { binding: None }).collect())
        }
        Expr::Compound { head, args } if matches!(head.as_ref(), Expr::Symbol(h) if *h == ctx.canon.list) => {
            match args.as_slice() {
                [Expr::Symbol(var), upper] => {
                    let upper_val = evaluate(ctx, upper);
                    let Expr::Integer(n) = upper_val else {
                        return None;
                    };
                    Some(
                        (1..=n)
                            .map(|i| IterationStep {
                                binding: Some((*var, Expr::integer(i))),
                            })
                            .collect(),
                    )
                }
                [Expr::Symbol(var), lo, hi] => {
                    let lo_val = evaluate(ctx, lo);
                    let hi_val = evaluate(ctx, hi);
                    let (Expr::Integer(a), Expr::Integer(b)) = (lo_val, hi_val) else {
                        return None;
                    };
                    Some(
                        (a..=b)
                            .map(|i| IterationStep {
                                binding: Some((*var, Expr::integer(i))),
                            })
                            .collect(),
                    )
                }
                [Expr::Symbol(var), lo, hi, step] => {
                    let lo_val = evaluate(ctx, lo);
                    let hi_val = evaluate(ctx, hi);
                    let step_val = evaluate(ctx, step);
                    let (Expr::Integer(a), Expr::Integer(b), Expr::Integer(s)) = (lo_val, hi_val, step_val) else {
                        return None;
                    };
                    if s == 0 {
                        return None;
                    }
                    let mut steps = Vec::new();
                    let mut i = a;
                    while (s > 0 && i <= b) || (s < 0 && i >= b) {
                        steps.push(IterationStep {
                            binding: Some((*var, Expr::integer(i))),
                        });
                        i += s;
                    }
                    Some(steps)
                }
                _ => None,
            }
        }
        _ => None,
    }
}

fn eval_table(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [body, spec] = args else {
        return errors::argument_error(&ctx.interner, "Table takes exactly two arguments", args.to_vec());
    };
    let Some(steps) = parse_iterator(ctx, spec) else {
        return Expr::call(ctx.special.table, args.to_vec());
    };
    let mut results = Vec::with_capacity(steps.len());
    for step in steps {
        let mut guard = ScopeGuard::new(ctx);
        if let Some((name, value)) = step.binding {
            guard.bind(name, Some(value));
        }
        results.push(evaluate(guard.ctx(), body));
    }
    Expr::compound(Expr::Symbol(ctx.canon.list), results)
}

fn eval_do(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [body, spec] = args else {
        return errors::argument_error(&ctx.interner, "Do takes exactly two arguments", args.to_vec());
    };
    let Some(steps) = parse_iterator(ctx, spec) else {
        return Expr::call(ctx.special.do_, args.to_vec());
    };
    for step in steps {
        let mut guard = ScopeGuard::new(ctx);
        if let Some((name, value)) = step.binding {
            guard.bind(name, Some(value));
        }
        evaluate(guard.ctx(), body);
    }
    Expr::Symbol(ctx.special.null)
}

/// `rule` is a single `Rule`/`RuleDelayed`, or a `List` of them (tried in
/// order, first match wins). A non-rule list element is an `ArgumentError`
/// (Open Question decision: fail loudly rather than skip silently).
fn try_replace_one(ctx: &mut Context, target: &Expr, rule: &Expr) -> Option<Result<Expr, Expr>> {
    let (head, parts) = rule.as_compound()?;
    let Expr::Symbol(h) = head else {
        return None;
    };
    if *h != ctx.canon.rule && *h != ctx.special.rule_delayed {
        return None;
    }
    let [lhs, rhs] = parts else {
        return Some(Err(errors::argument_error(&ctx.interner, "malformed rule", vec![rule.clone()])));
    };
    let mctx = ctx.match_context();
    let bindings = rf_match::match_expr(lhs, target, &mctx)?;
    let defining_head = match lhs.as_compound() {
        Some((Expr::Symbol(h), _)) => *h,
        _ => ctx.special.null,
    };
    let is_flat = ctx.symbols.attributes(defining_head).contains(Attributes::FLAT);
    let substituted = substitute(ctx, rhs, &bindings, defining_head, is_flat);
    Some(Ok(evaluate(ctx, &substituted)))
}

fn eval_replace(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [expr, rule_arg] = args else {
        return errors::argument_error(&ctx.interner, "Replace takes exactly two arguments", args.to_vec());
    };
    let target = evaluate(ctx, expr);
    let rule_val = evaluate(ctx, rule_arg);
    if rule_val.has_head(ctx.canon.list) {
        for rule in rule_val.args() {
            match try_replace_one(ctx, &target, rule) {
                Some(Ok(v)) => return v,
                Some(Err(e)) => return e,
                None => {
                    if !rule.has_head(ctx.canon.rule) && !rule.has_head(ctx.special.rule_delayed) {
                        return errors::argument_error(&ctx.interner, "Replace: list element is not a Rule", vec![rule.clone()]);
                    }
                }
            }
        }
        target
    } else {
        match try_replace_one(ctx, &target, &rule_val) {
            Some(Ok(v)) => v,
            Some(Err(e)) => e,
            None => target,
        }
    }
}

fn eval_replace_all(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [expr, rule_arg] = args else {
        return errors::argument_error(&ctx.interner, "ReplaceAll takes exactly two arguments", args.to_vec());
    };
    let target = evaluate(ctx, expr);
    let rule_val = evaluate(ctx, rule_arg);
    replace_all_recursive(ctx, &target, &rule_val)
}

fn replace_all_recursive(ctx: &mut Context, target: &Expr, rule_val: &Expr) -> Expr {
    let replaced = if rule_val.has_head(ctx.canon.list) {
        rule_val.args().iter().find_map(|rule| try_replace_one(ctx, target, rule))
    } else {
        try_replace_one(ctx, target, rule_val)
    };
    match replaced {
        Some(Ok(v)) => v, // never descend into a replaced subtree
        Some(Err(e)) => e,
        None => match target {
            Expr::Compound { head, args } => {
                let new_head = replace_all_recursive(ctx, head, rule_val);
                let new_args: Vec<Expr> = args.iter().map(|a| replace_all_recursive(ctx, a, rule_val)).collect();
                Expr::compound(new_head, new_args)
            }
            _ => target.clone(),
        },
    }
}

fn eval_rule_delayed(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [lhs, rhs] = args else {
        return errors::argument_error(&ctx.interner, "RuleDelayed takes exactly two arguments", args.to_vec());
    };
    let lhs_val = evaluate(ctx, lhs);
    Expr::call(ctx.special.rule_delayed, vec![lhs_val, rhs.clone()])
}

fn eval_match_q(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [expr, pattern] = args else {
        return errors::argument_error(&ctx.interner, "MatchQ takes exactly two arguments", args.to_vec());
    };
    let target = evaluate(ctx, expr);
    let pattern_val = evaluate(ctx, pattern);
    let mctx = ctx.match_context();
    Expr::Bool(test_match(&pattern_val, &target, &mctx))
}

fn eval_attributes(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [Expr::Symbol(name)] = args else {
        return errors::argument_error(&ctx.interner, "Attributes takes exactly one symbol", args.to_vec());
    };
    let attrs = ctx.symbols.attributes(*name);
    Expr::compound(Expr::Symbol(ctx.canon.list), attribute_names(ctx, attrs))
}

fn attribute_names(ctx: &Context, attrs: Attributes) -> Vec<Expr> {
    const NAMES: &[(Attributes, &str)] = &[
        (Attributes::ORDERLESS, "Orderless"),
        (Attributes::FLAT, "Flat"),
        (Attributes::ONE_IDENTITY, "OneIdentity"),
        (Attributes::LISTABLE, "Listable"),
        (Attributes::HOLD_ALL, "HoldAll"),
        (Attributes::HOLD_FIRST, "HoldFirst"),
        (Attributes::HOLD_REST, "HoldRest"),
        (Attributes::PROTECTED, "Protected"),
        (Attributes::CONSTANT, "Constant"),
        (Attributes::NUMERIC_FUNCTION, "NumericFunction"),
    ];
    NAMES
        .iter()
        .filter(|(flag, _)| attrs.contains(*flag))
        .map(|(_, name)| Expr::Symbol(ctx.interner.intern(name)))
        .collect()
}

fn parse_attribute(ctx: &Context, expr: &Expr) -> Option<Attributes> {
    let Expr::Symbol(name) = expr else {
        return None;
    };
    let text = ctx.interner.resolve(*name);
    Some(match text {
        "Orderless" => Attributes::ORDERLESS,
        "Flat" => Attributes::FLAT,
        "OneIdentity" => Attributes::ONE_IDENTITY,
        "Listable" => Attributes::LISTABLE,
        "HoldAll" => Attributes::HOLD_ALL,
        "HoldFirst" => Attributes::HOLD_FIRST,
        "HoldRest" => Attributes::HOLD_REST,
        "Protected" => Attributes::PROTECTED,
        "Constant" => Attributes::CONSTANT,
        "NumericFunction" => Attributes::NUMERIC_FUNCTION,
        _ => return None,
    })
}

fn eval_set_attributes(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [Expr::Symbol(name), attr_list_raw] = args else {
        return errors::argument_error(&ctx.interner, "SetAttributes takes a symbol and a list", args.to_vec());
    };
    let attr_list = evaluate(ctx, attr_list_raw);
    let mut attrs = ctx.symbols.attributes(*name);
    let entries: Vec<&Expr> = if attr_list.has_head(ctx.canon.list) {
        attr_list.args().iter().collect()
    } else {
        vec![&attr_list]
    };
    for entry in entries {
        match parse_attribute(ctx, entry) {
            Some(flag) => attrs |= flag,
            None => {
                let text = match entry {
                    Expr::Symbol(n) => ctx.interner.resolve(*n).to_string(),
                    other => format!("{other}"),
                };
                return errors::unknown_attribute(&ctx.interner, &text);
            }
        }
    }
    ctx.symbols.set_attributes(*name, attrs);
    Expr::Symbol(ctx.special.null)
}

fn eval_clear_attributes(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [Expr::Symbol(name), attr_list_raw] = args else {
        return errors::argument_error(&ctx.interner, "ClearAttributes takes a symbol and a list", args.to_vec());
    };
    let attr_list = evaluate(ctx, attr_list_raw);
    let mut attrs = ctx.symbols.attributes(*name);
    let entries: Vec<&Expr> = if attr_list.has_head(ctx.canon.list) {
        attr_list.args().iter().collect()
    } else {
        vec![&attr_list]
    };
    for entry in entries {
        if let Some(flag) = parse_attribute(ctx, entry) {
            attrs.remove(flag);
        }
    }
    ctx.symbols.set_attributes(*name, attrs);
    Expr::Symbol(ctx.special.null)
}

fn eval_map(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [f, list] = args else {
        return errors::argument_error(&ctx.interner, "Map takes exactly two arguments", args.to_vec());
    };
    let f_val = evaluate(ctx, f);
    let list_val = evaluate(ctx, list);
    let Some((head, elements)) = list_val.as_compound() else {
        return errors::argument_error(&ctx.interner, "Map's second argument must be a compound", args.to_vec());
    };
    let mapped: Vec<Expr> = elements
        .iter()
        .map(|e| evaluate(ctx, &Expr::compound(f_val.clone(), vec![e.clone()])))
        .collect();
    Expr::compound(head.clone(), mapped)
}

fn eval_apply(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [f, list] = args else {
        return errors::argument_error(&ctx.interner, "Apply takes exactly two arguments", args.to_vec());
    };
    let f_val = evaluate(ctx, f);
    let list_val = evaluate(ctx, list);
    let Some((_, elements)) = list_val.as_compound() else {
        return errors::argument_error(&ctx.interner, "Apply's second argument must be a compound", args.to_vec());
    };
    evaluate(ctx, &Expr::compound(f_val, elements.to_vec()))
}

fn eval_assert(ctx: &mut Context, args: &[Expr]) -> Expr {
    let [x] = args else {
        return errors::argument_error(&ctx.interner, "Assert takes exactly one argument", args.to_vec());
    };
    let v = evaluate(ctx, x);
    if v == Expr::Bool(true) {
        Expr::Symbol(ctx.special.null)
    } else {
        errors::assertion_failed(&ctx.interner, vec![v])
    }
}
