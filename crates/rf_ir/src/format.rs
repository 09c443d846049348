//! Textual rendering: `FullForm` (uniform `Head(arg, arg, ...)`) and
//! `InputForm` (operator sugar reintroduced for the handful of heads that
//! have infix/bracket notation).
//!
//! Both are pure functions of the tree plus the interner; neither touches
//! evaluation state, which is why they live in `rf_ir` rather than
//! `rf_eval` even though the builtin operators that expose them to
//! rulefold programs live in the evaluator crate.

use std::fmt::Write as _;

use crate::expr::Expr;
use crate::name::StringLookup;

/// Render in `FullForm`: every compound as `Head(arg1, arg2, ...)`, no
/// operator sugar, no Orderless re-sorting (the tree is shown exactly as
/// stored).
pub fn full_form(expr: &Expr, interner: &impl StringLookup) -> String {
    let mut out = String::new();
    write_full_form(expr, interner, &mut out);
    out
}

fn write_full_form(expr: &Expr, interner: &impl StringLookup, out: &mut String) {
    match expr {
        Expr::Integer(n) => {
            let _ = write!(out, "{n}");
        }
        Expr::Real(n) => {
            let _ = write!(out, "{}", format_real(*n));
        }
        Expr::Str(s) => {
            let _ = write!(out, "{:?}", &**s);
        }
        Expr::Bool(b) => {
            out.push_str(if *b { "True" } else { "False" });
        }
        Expr::Symbol(name) => {
            out.push_str(interner.lookup(*name));
        }
        Expr::ByteArray(bytes) => {
            out.push_str("ByteArray[<");
            let _ = write!(out, "{}", bytes.len());
            out.push_str(" bytes>]");
        }
        Expr::Association(data) => {
            out.push_str("Association(");
            for (i, (k, v)) in data.pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_full_form(k, interner, out);
                out.push_str(" -> ");
                write_full_form(v, interner, out);
            }
            out.push(')');
        }
        Expr::Error(err) => {
            out.push_str("Error(");
            out.push_str(interner.lookup(err.kind));
            out.push_str(", ");
            let _ = write!(out, "{:?}", &*err.message);
            out.push(')');
        }
        Expr::Compound { head, args } => {
            write_full_form(head, interner, out);
            out.push('(');
            for (i, a) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_full_form(a, interner, out);
            }
            out.push(')');
        }
    }
}

/// Render in `InputForm`: reintroduces a small table of infix/bracket
/// notations for readability. Anything not in the table falls back to
/// `FullForm`'s `Head(args...)` shape.
pub fn input_form(expr: &Expr, interner: &impl StringLookup) -> String {
    let mut out = String::new();
    write_input_form(expr, interner, &mut out);
    out
}

fn write_input_form(expr: &Expr, interner: &impl StringLookup, out: &mut String) {
    match expr {
        Expr::Compound { head, args } => {
            if let Expr::Symbol(name) = &**head {
                let head_name = interner.lookup(*name);
                if let Some(op) = infix_operator(head_name) {
                    if args.len() == 2 {
                        write_input_form(&args[0], interner, out);
                        let _ = write!(out, " {op} ");
                        write_input_form(&args[1], interner, out);
                        return;
                    }
                }
                match (head_name, args.len()) {
                    ("List", _) => {
                        out.push('{');
                        for (i, a) in args.iter().enumerate() {
                            if i > 0 {
                                out.push_str(", ");
                            }
                            write_input_form(a, interner, out);
                        }
                        out.push('}');
                        return;
                    }
                    ("Part", 2) => {
                        write_input_form(&args[0], interner, out);
                        out.push_str("[[");
                        write_input_form(&args[1], interner, out);
                        out.push_str("]]");
                        return;
                    }
                    _ => {}
                }
            }
            write_input_form(head, interner, out);
            out.push('(');
            for (i, a) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_input_form(a, interner, out);
            }
            out.push(')');
        }
        other => write_full_form(other, interner, out),
    }
}

fn infix_operator(head_name: &str) -> Option<&'static str> {
    Some(match head_name {
        "Plus" => "+",
        "Times" => "*",
        "Subtract" => "-",
        "Divide" => "/",
        "Power" => "^",
        "Rule" => "->",
        "RuleDelayed" => ":>",
        "Equal" => "==",
        "Unequal" => "!=",
        "Less" => "<",
        "Greater" => ">",
        "LessEqual" => "<=",
        "GreaterEqual" => ">=",
        "And" => "&&",
        "Or" => "||",
        "Set" => "=",
        "SetDelayed" => ":=",
        _ => return None,
    })
}

/// Shared real-number formatting: avoids Rust's default `1` for `1.0` so
/// `Real` values are visibly distinct from `Integer` ones in any rendering.
pub fn format_real(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{n:.1}")
    } else {
        format!("{n}")
    }
}
