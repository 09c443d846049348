//! `Association` construction and `Keys`/`Values` (spec.md §4.4), plus the
//! supplemented non-erroring `Lookup(assoc, key, default)`.

use rf_ir::Expr;

use crate::context::Context;

pub fn keys(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [Expr::Association(data)] = args else { return None };
    let ks: Vec<Expr> = data.pairs.iter().map(|(k, _)| k.clone()).collect();
    Some(Expr::compound(Expr::Symbol(ctx.canon.list), ks))
}

pub fn values(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [Expr::Association(data)] = args else { return None };
    let vs: Vec<Expr> = data.pairs.iter().map(|(_, v)| v.clone()).collect();
    Some(Expr::compound(Expr::Symbol(ctx.canon.list), vs))
}

pub fn association(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let mut pairs = Vec::with_capacity(args.len());
    for a in args {
        let (head, parts) = a.as_compound()?;
        if !matches!(head, Expr::Symbol(h) if *h == ctx.canon.rule) {
            return None;
        }
        let [k, v] = parts else { return None };
        pairs.push((k.clone(), v.clone()));
    }
    Some(Expr::association(pairs))
}

pub fn lookup(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [Expr::Association(data), key, default] = args else { return None };
    Some(data.get(key).cloned().unwrap_or_else(|| default.clone()))
}
