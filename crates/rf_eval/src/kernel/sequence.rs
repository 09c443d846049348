//! Sequence operations on any sliceable (`List`, `String`, `ByteArray`):
//! `Length`, `First`/`Last`/`Rest`/`Most`, `Part`, `Take`/`Drop`,
//! `RotateLeft`/`RotateRight`, `Reverse`, `Flatten`, `Sort`, `Append`
//! (spec.md §4.4), plus the supplemented `StringJoin`/`StringLength`/
//! `StringTake`/`StringDrop` thin wrappers that reuse the same range math.

use rf_ir::{Name, Expr};

use crate::context::Context;
use crate::errors;

fn as_list<'a>(e: &'a Expr, list_name: Name) -> Option<&'a [Expr]> {
    match e {
        Expr::Compound { head, args } if matches!(&**head, Expr::Symbol(s) if *s == list_name) => Some(args),
        _ => None,
    }
}

/// 1-based index with negative-from-end support; `None` for any index that
/// lands out of `[0, len)` once resolved.
fn resolve_index(i: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let n = len as i64;
    let idx = if i > 0 {
        i - 1
    } else if i < 0 {
        n + i
    } else {
        return None;
    };
    if idx < 0 || idx >= n {
        None
    } else {
        Some(idx as usize)
    }
}

pub fn length(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    match a {
        Expr::Compound { .. } => Some(Expr::integer(a.length())),
        Expr::Str(s) => Some(Expr::integer(s.chars().count() as i64)),
        Expr::ByteArray(b) => Some(Expr::integer(b.len() as i64)),
        Expr::Association(d) => Some(Expr::integer(d.len() as i64)),
        _ => None,
    }
}

pub fn first(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    if let Some(items) = as_list(a, ctx.canon.list) {
        return match items.first() {
            Some(v) => Some(v.clone()),
            None => Some(errors::part_error(&ctx.interner, "First of an empty list", args.to_vec())),
        };
    }
    if let Expr::Str(s) = a {
        return match s.chars().next() {
            Some(c) => Some(Expr::string(c.to_string())),
            None => Some(errors::part_error(&ctx.interner, "First of an empty string", args.to_vec())),
        };
    }
    None
}

pub fn last(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    if let Some(items) = as_list(a, ctx.canon.list) {
        return match items.last() {
            Some(v) => Some(v.clone()),
            None => Some(errors::part_error(&ctx.interner, "Last of an empty list", args.to_vec())),
        };
    }
    if let Expr::Str(s) = a {
        return match s.chars().last() {
            Some(c) => Some(Expr::string(c.to_string())),
            None => Some(errors::part_error(&ctx.interner, "Last of an empty string", args.to_vec())),
        };
    }
    None
}

pub fn rest(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    if let Some(items) = as_list(a, ctx.canon.list) {
        if items.is_empty() {
            return Some(errors::part_error(&ctx.interner, "Rest of an empty list", args.to_vec()));
        }
        return Some(Expr::compound(Expr::Symbol(ctx.canon.list), items[1..].to_vec()));
    }
    if let Expr::Str(s) = a {
        let mut chars = s.chars();
        if chars.next().is_none() {
            return Some(errors::part_error(&ctx.interner, "Rest of an empty string", args.to_vec()));
        }
        return Some(Expr::string(chars.as_str().to_string()));
    }
    None
}

pub fn most(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    if let Some(items) = as_list(a, ctx.canon.list) {
        if items.is_empty() {
            return Some(errors::part_error(&ctx.interner, "Most of an empty list", args.to_vec()));
        }
        return Some(Expr::compound(Expr::Symbol(ctx.canon.list), items[..items.len() - 1].to_vec()));
    }
    if let Expr::Str(s) = a {
        let chars: Vec<char> = s.chars().collect();
        if chars.is_empty() {
            return Some(errors::part_error(&ctx.interner, "Most of an empty string", args.to_vec()));
        }
        return Some(Expr::string(chars[..chars.len() - 1].iter().collect::<String>()));
    }
    None
}

pub fn part(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [target, index] = args else { return None };
    if let Expr::Association(data) = target {
        return match data.get(index) {
            Some(v) => Some(v.clone()),
            None => Some(errors::part_error(&ctx.interner, "key not found in Association", args.to_vec())),
        };
    }
    let Expr::Integer(i) = index else { return None };
    if let Some(items) = as_list(target, ctx.canon.list) {
        return match resolve_index(*i, items.len()) {
            Some(idx) => Some(items[idx].clone()),
            None => Some(errors::part_error(&ctx.interner, "Part index out of range", args.to_vec())),
        };
    }
    if let Expr::Str(s) = target {
        let chars: Vec<char> = s.chars().collect();
        return match resolve_index(*i, chars.len()) {
            Some(idx) => Some(Expr::string(chars[idx].to_string())),
            None => Some(errors::part_error(&ctx.interner, "Part index out of range", args.to_vec())),
        };
    }
    if let Expr::ByteArray(b) = target {
        return match resolve_index(*i, b.len()) {
            Some(idx) => Some(Expr::integer(b[idx] as i64)),
            None => Some(errors::part_error(&ctx.interner, "Part index out of range", args.to_vec())),
        };
    }
    None
}

/// A half-open `[start, end)` range to keep, for `Take`: a plain integer
/// clamps at the sequence length; a `List(a, b)` range resolves both ends
/// 1-based/negative-from-end.
pub(super) fn take_range(spec: &Expr, len: usize, list_name: Name) -> Option<std::ops::Range<usize>> {
    match spec {
        Expr::Integer(n) => {
            if *n >= 0 {
                Some(0..(*n as usize).min(len))
            } else {
                let count = ((-*n) as usize).min(len);
                Some((len - count)..len)
            }
        }
        Expr::Compound { head, args } if matches!(&**head, Expr::Symbol(s) if *s == list_name) => {
            let [Expr::Integer(a), Expr::Integer(b)] = args.as_slice() else { return None };
            let start = resolve_index(*a, len)?;
            let end = resolve_index(*b, len)?;
            if start > end {
                return None;
            }
            Some(start..(end + 1))
        }
        _ => None,
    }
}

/// The indices to keep after `Drop`: a plain integer empties from one end
/// (clamped at the full length); a `List(a, b)` range removes that middle
/// slice and keeps both remaining sides.
pub(super) fn drop_keep(spec: &Expr, len: usize, list_name: Name) -> Option<Vec<usize>> {
    match spec {
        Expr::Integer(n) => {
            if *n >= 0 {
                let count = (*n as usize).min(len);
                Some((count..len).collect())
            } else {
                let count = ((-*n) as usize).min(len);
                Some((0..(len - count)).collect())
            }
        }
        Expr::Compound { head, args } if matches!(&**head, Expr::Symbol(s) if *s == list_name) => {
            let [Expr::Integer(a), Expr::Integer(b)] = args.as_slice() else { return None };
            let start = resolve_index(*a, len)?;
            let end = resolve_index(*b, len)?;
            if start > end {
                return None;
            }
            Some((0..len).filter(|i| *i < start || *i > end).collect())
        }
        _ => None,
    }
}

pub fn take(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [target, spec] = args else { return None };
    if let Some(items) = as_list(target, ctx.canon.list) {
        let range = take_range(spec, items.len(), ctx.canon.list)?;
        return Some(Expr::compound(Expr::Symbol(ctx.canon.list), items[range].to_vec()));
    }
    if let Expr::Str(s) = target {
        let chars: Vec<char> = s.chars().collect();
        let range = take_range(spec, chars.len(), ctx.canon.list)?;
        return Some(Expr::string(chars[range].iter().collect::<String>()));
    }
    None
}

pub fn drop(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [target, spec] = args else { return None };
    if let Some(items) = as_list(target, ctx.canon.list) {
        let keep = drop_keep(spec, items.len(), ctx.canon.list)?;
        let result: Vec<Expr> = keep.into_iter().map(|i| items[i].clone()).collect();
        return Some(Expr::compound(Expr::Symbol(ctx.canon.list), result));
    }
    if let Expr::Str(s) = target {
        let chars: Vec<char> = s.chars().collect();
        let keep = drop_keep(spec, chars.len(), ctx.canon.list)?;
        let result: String = keep.into_iter().map(|i| chars[i]).collect();
        return Some(Expr::string(result));
    }
    None
}

fn rotate(ctx: &Context, args: &[Expr], left: bool) -> Option<Expr> {
    let (target, n) = match args {
        [t] => (t, 1i64),
        [t, Expr::Integer(n)] => (t, *n),
        _ => return None,
    };
    let items = as_list(target, ctx.canon.list)?;
    if items.is_empty() {
        return Some(target.clone());
    }
    let len = items.len() as i64;
    let left_shift = if left { n.rem_euclid(len) } else { (-n).rem_euclid(len) } as usize;
    let mut rotated = items[left_shift..].to_vec();
    rotated.extend_from_slice(&items[..left_shift]);
    Some(Expr::compound(Expr::Symbol(ctx.canon.list), rotated))
}

pub fn rotate_left(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    rotate(ctx, args, true)
}

pub fn rotate_right(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    rotate(ctx, args, false)
}

pub fn reverse(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    let items = as_list(a, ctx.canon.list)?;
    let mut rev = items.to_vec();
    rev.reverse();
    Some(Expr::compound(Expr::Symbol(ctx.canon.list), rev))
}

fn flatten_into(e: &Expr, list_name: Name, out: &mut Vec<Expr>) {
    if e.has_head(list_name) {
        for item in e.args() {
            flatten_into(item, list_name, out);
        }
    } else {
        out.push(e.clone());
    }
}

/// Recursively splices nested `List`s of the same head into one flat list;
/// a `List` nested under a *different* head is left untouched.
pub fn flatten(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    if !a.has_head(ctx.canon.list) {
        return None;
    }
    let mut out = Vec::new();
    flatten_into(a, ctx.canon.list, &mut out);
    Some(Expr::compound(Expr::Symbol(ctx.canon.list), out))
}

pub fn sort(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [a] = args else { return None };
    let items = as_list(a, ctx.canon.list)?;
    let interner = &*ctx.interner;
    let mut sorted = items.to_vec();
    sorted.sort_by(|x, y| (x.length(), rf_ir::format::input_form(x, interner)).cmp(&(y.length(), rf_ir::format::input_form(y, interner))));
    Some(Expr::compound(Expr::Symbol(ctx.canon.list), sorted))
}

pub fn append(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [target, elem] = args else { return None };
    let items = as_list(target, ctx.canon.list)?;
    let mut out = items.to_vec();
    out.push(elem.clone());
    Some(Expr::compound(Expr::Symbol(ctx.canon.list), out))
}

pub fn string_join(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let mut out = String::new();
    for a in args {
        match a {
            Expr::Str(s) => out.push_str(s),
            _ => return None,
        }
    }
    Some(Expr::string(out))
}

pub fn string_length(_ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [Expr::Str(s)] = args else { return None };
    Some(Expr::integer(s.chars().count() as i64))
}

pub fn string_take(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [Expr::Str(s), spec] = args else { return None };
    let chars: Vec<char> = s.chars().collect();
    let range = take_range(spec, chars.len(), ctx.canon.list)?;
    Some(Expr::string(chars[range].iter().collect::<String>()))
}

pub fn string_drop(ctx: &Context, args: &[Expr]) -> Option<Expr> {
    let [Expr::Str(s), spec] = args else { return None };
    let chars: Vec<char> = s.chars().collect();
    let keep = drop_keep(spec, chars.len(), ctx.canon.list)?;
    Some(Expr::string(keep.into_iter().map(|i| chars[i]).collect::<String>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_is_one_based_with_negative_from_end() {
        let ctx = Context::new();
        let xs = Expr::call(ctx.canon.list, vec![Expr::integer(10), Expr::integer(20), Expr::integer(30)]);
        assert_eq!(part(&ctx, &[xs.clone(), Expr::integer(1)]), Some(Expr::integer(10)));
        assert_eq!(part(&ctx, &[xs, Expr::integer(-1)]), Some(Expr::integer(30)));
    }

    #[test]
    fn part_out_of_range_is_an_error() {
        let ctx = Context::new();
        let xs = Expr::call(ctx.canon.list, vec![Expr::integer(1)]);
        assert!(part(&ctx, &[xs, Expr::integer(5)]).expect("should fire").is_error());
    }

    #[test]
    fn take_clamps_when_the_count_overflows_the_length() {
        let ctx = Context::new();
        let xs = Expr::call(ctx.canon.list, vec![Expr::integer(1), Expr::integer(2)]);
        let result = take(&ctx, &[xs, Expr::integer(10)]).expect("should fire");
        assert_eq!(result.length(), 2);
    }

    #[test]
    fn drop_empties_when_the_count_overflows_the_length() {
        let ctx = Context::new();
        let xs = Expr::call(ctx.canon.list, vec![Expr::integer(1), Expr::integer(2)]);
        let result = drop(&ctx, &[xs, Expr::integer(10)]).expect("should fire");
        assert_eq!(result.length(), 0);
    }

    #[test]
    fn flatten_splices_nested_lists_but_not_other_heads() {
        let ctx = Context::new();
        let f = ctx.interner.intern("f");
        let inner = Expr::call(ctx.canon.list, vec![Expr::integer(2), Expr::integer(3)]);
        let tagged = Expr::call(f, vec![Expr::integer(4)]);
        let outer = Expr::call(ctx.canon.list, vec![Expr::integer(1), inner, tagged]);
        let result = flatten(&ctx, &[outer]).expect("should fire");
        assert_eq!(result.length(), 3);
    }

    #[test]
    fn string_take_and_drop_operate_on_chars() {
        let ctx = Context::new();
        let s = Expr::string("hello");
        assert_eq!(string_take(&ctx, &[s.clone(), Expr::integer(2)]), Some(Expr::string("he")));
        assert_eq!(string_drop(&ctx, &[s, Expr::integer(2)]), Some(Expr::string("llo")));
    }
}
