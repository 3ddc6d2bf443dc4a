//! Single-expression evaluator.
//!
//! Evaluates one expression string against a [`Bindings`] map.  Three shapes
//! are tried in order and the first that resolves wins:
//!
//! | Shape         | Form                         | Result                          |
//! |---------------|------------------------------|---------------------------------|
//! | arithmetic    | `a op b`, op ∈ `+ - * /`     | formatted [`Number`]            |
//! | equality      | `a == b`, `a === b`, `a != b` | `"true"` / `"false"`           |
//! | concatenation | `p + p + …`                  | parts joined                    |
//!
//! There is no precedence and no nesting: arithmetic splits on the *first*
//! operator character and both sides must be a number literal or a variable
//! bound to one.  Anything that fits no shape is echoed back unchanged.
//!
//! Trying arithmetic first means `"a" + "b"` falls through to concatenation
//! once its operands fail to resolve as numbers, while `1 + 2` never reaches
//! the concatenation path.

use crate::bindings::Bindings;

use super::source::string_literal;
use super::value::{is_numeric_literal, Number};

/// Evaluate `expr`, echoing the trimmed input if no shape resolves.
pub fn evaluate(expr: &str, bindings: &Bindings) -> String {
    let expr = expr.trim();
    try_evaluate(expr, bindings).unwrap_or_else(|| expr.to_owned())
}

/// Evaluate `expr`, returning `None` if no shape resolves.
pub fn try_evaluate(expr: &str, bindings: &Bindings) -> Option<String> {
    let expr = expr.trim();
    arithmetic(expr, bindings)
        .or_else(|| equality(expr, bindings))
        .or_else(|| concatenation(expr, bindings))
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

fn arithmetic(expr: &str, bindings: &Bindings) -> Option<String> {
    let (lhs, op, rhs) = split_first(expr, |rest| {
        rest.chars().next().filter(|&c| matches!(c, '+' | '-' | '*' | '/')).map(|c| (c, 1))
    })?;
    let a = operand(lhs, bindings)?.0;
    let b = operand(rhs, bindings)?.0;

    let value = match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        _ if b == 0.0 => return Some("Infinity".to_owned()),
        _ => a / b,
    };
    Some(Number(value).to_string())
}

fn operand(token: &str, bindings: &Bindings) -> Option<Number> {
    Number::parse_literal(token).or_else(|| bindings.get_number(token))
}

// ── Equality ──────────────────────────────────────────────────────────────────

fn equality(expr: &str, bindings: &Bindings) -> Option<String> {
    let (lhs, negate, rhs) = split_first(expr, |rest| {
        if rest.starts_with("===") || rest.starts_with("!==") {
            Some((rest.starts_with('!'), 3))
        } else if rest.starts_with("==") || rest.starts_with("!=") {
            Some((rest.starts_with('!'), 2))
        } else {
            None
        }
    })?;
    let equal = side(lhs, bindings) == side(rhs, bindings);
    Some((equal != negate).to_string())
}

fn side<'a>(token: &'a str, bindings: &'a Bindings) -> &'a str {
    match string_literal(token) {
        Some(lit) if lit.prefix.is_empty() && lit.quote != '`' => lit.body,
        _ => bindings.get(token).unwrap_or(token),
    }
}

// ── Concatenation ─────────────────────────────────────────────────────────────

fn concatenation(expr: &str, bindings: &Bindings) -> Option<String> {
    if !expr.contains('+') {
        return None;
    }
    let mut out = String::new();
    for part in split_plus(expr) {
        out.push_str(concat_part(part.trim(), bindings)?);
    }
    Some(out)
}

fn concat_part<'a>(part: &'a str, bindings: &'a Bindings) -> Option<&'a str> {
    for quote in ['"', '\''] {
        if part.len() >= 2 && part.starts_with(quote) && part.ends_with(quote) {
            return Some(&part[1..part.len() - 1]);
        }
    }
    if let Some(value) = bindings.get(part) {
        return Some(value);
    }
    is_numeric_literal(part).then_some(part)
}

/// Split on `+` outside quotes.  Backslash escapes are not recognised.
fn split_plus(expr: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut begin = 0;
    for (i, ch) in expr.char_indices() {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(q), c) if c == q => quote = None,
            (None, '+') => {
                parts.push(&expr[begin..i]);
                begin = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&expr[begin..]);
    parts
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Split `expr` at the first operator recognised by `op_at`, which inspects
/// the text from a candidate position and returns the operator and its byte
/// length.  The left side must be non-empty and so must the right side once
/// trimmed; a candidate that leaves the right side empty is skipped.
fn split_first<T>(expr: &str, op_at: impl Fn(&str) -> Option<(T, usize)>) -> Option<(&str, T, &str)> {
    for (i, _) in expr.char_indices().skip(1) {
        let Some((op, len)) = op_at(&expr[i..]) else { continue };
        let lhs = expr[..i].trim_end();
        let rhs = expr[i + len..].trim_start();
        if !lhs.is_empty() && !rhs.is_empty() {
            return Some((lhs, op, rhs));
        }
    }
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
